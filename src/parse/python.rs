use crate::errors::{DepwalkError, Result};
use crate::parse::common::{
    compact_text, first_syntax_error, is_python_package, join_dotted, parse_tree, read_source,
    ImportKind, ImportRecord, PYTHON_PACKAGE_MARKER,
};
use crate::parse::LanguageParser;
use crate::walk::{normalize, parent_dir};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use streaming_iterator::StreamingIterator;

const IMPORT_QUERY: &str =
    "[(import_statement) (import_from_statement) (future_import_statement)] @import";

pub struct PythonParser {
    project_root: Option<PathBuf>,
}

impl PythonParser {
    pub fn new(project_root: Option<PathBuf>) -> Self {
        Self { project_root }
    }

    fn language_grammar() -> tree_sitter::Language {
        tree_sitter_python::LANGUAGE.into()
    }

    /// Scan source text for imports. Fails on syntax errors, like the
    /// interpreter would.
    pub fn extract_imports(&self, source: &str, file_path: &Path) -> Result<Vec<ImportRecord>> {
        let lang = Self::language_grammar();
        let tree = parse_tree(&lang, source, file_path)?;

        if let Some(bad) = first_syntax_error(tree.root_node()) {
            let pos = bad.start_position();
            return Err(DepwalkError::parse(
                file_path,
                format!("invalid syntax at line {}, column {}", pos.row + 1, pos.column + 1),
            ));
        }

        let query = tree_sitter::Query::new(&lang, IMPORT_QUERY)
            .map_err(|e| DepwalkError::parse(file_path, format!("bad import query: {e}")))?;

        let mut imports = Vec::new();
        let mut cursor = tree_sitter::QueryCursor::new();
        let mut matches = cursor.matches(&query, tree.root_node(), source.as_bytes());
        while let Some(m) = matches.next() {
            for capture in m.captures {
                Self::collect_statement(capture.node, source, &mut imports);
            }
        }
        Ok(imports)
    }

    fn collect_statement(node: tree_sitter::Node, source: &str, imports: &mut Vec<ImportRecord>) {
        match node.kind() {
            "import_statement" => {
                // `import a.b, c as d`: one record per name, aliases dropped
                for module in Self::imported_names(node, source) {
                    imports.push(ImportRecord::new(
                        ImportKind::Import,
                        module.clone(),
                        vec![module],
                        0,
                    ));
                }
            }
            "future_import_statement" => {
                let names = Self::imported_names(node, source);
                imports.push(ImportRecord::new(ImportKind::FromImport, "__future__", names, 0));
            }
            "import_from_statement" => {
                let Some(module_node) = node.child_by_field_name("module_name") else {
                    return;
                };
                let (level, module) = if module_node.kind() == "relative_import" {
                    Self::split_relative(module_node, source)
                } else {
                    (0, compact_text(module_node, source))
                };
                let names = Self::imported_names(node, source);

                if module.is_empty() {
                    // `from . import x, y`: each name stands for a sibling module
                    for name in names.into_iter().filter(|n| n != "*") {
                        imports.push(ImportRecord::new(
                            ImportKind::RelativeImport,
                            name.clone(),
                            vec![name],
                            level,
                        ));
                    }
                } else {
                    imports.push(ImportRecord::new(ImportKind::FromImport, module, names, level));
                }
            }
            _ => {}
        }
    }

    /// Leading-dot count and trailing module of a `relative_import` node.
    fn split_relative(node: tree_sitter::Node, source: &str) -> (usize, String) {
        let mut level = 0;
        let mut module = String::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "import_prefix" => {
                    level = compact_text(child, source).matches('.').count();
                }
                "dotted_name" => module = compact_text(child, source),
                _ => {}
            }
        }
        (level, module)
    }

    /// Names listed after `import`, in source order. Wildcards yield `*`.
    fn imported_names(node: tree_sitter::Node, source: &str) -> Vec<String> {
        let mut names = Vec::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "wildcard_import" {
                names.push("*".to_string());
            }
        }
        let mut cursor = node.walk();
        for child in node.children_by_field_name("name", &mut cursor) {
            let target = if child.kind() == "aliased_import" {
                child.child_by_field_name("name").unwrap_or(child)
            } else {
                child
            };
            let text = compact_text(target, source);
            if !text.is_empty() {
                names.push(text);
            }
        }
        names
    }

    /// `<path>.py`, then `<path>/__init__.py`.
    fn find_module_file(module_path: &Path) -> Option<PathBuf> {
        let mut file: OsString = module_path.as_os_str().to_owned();
        file.push(".py");
        let file = PathBuf::from(file);
        if file.is_file() {
            return Some(normalize(&file));
        }

        let init = module_path.join(PYTHON_PACKAGE_MARKER);
        if init.is_file() {
            return Some(normalize(&init));
        }
        None
    }
}

impl Default for PythonParser {
    fn default() -> Self {
        Self::new(None)
    }
}

impl LanguageParser for PythonParser {
    fn language(&self) -> &'static str {
        "python"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &[".py"]
    }

    fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    fn bind_project_root(&mut self, root: PathBuf) {
        self.project_root = Some(root);
    }

    /// Walk up from `start_dir` through enclosing packages; the first parent
    /// without `__init__.py` is the root. A loose script's root is therefore
    /// the directory above it.
    fn find_project_root(&self, start_dir: &Path) -> PathBuf {
        let mut current = start_dir;
        while let Some(parent) = parent_dir(current) {
            if !is_python_package(parent) {
                tracing::debug!("python project root: {}", parent.display());
                return parent.to_path_buf();
            }
            current = parent;
        }
        start_dir.to_path_buf()
    }

    fn parse_imports(&self, file: &Path) -> Result<Vec<ImportRecord>> {
        let source = read_source(file)?;
        self.extract_imports(&source, file)
    }

    fn resolve_import_path(&self, record: &ImportRecord, current_file: &Path) -> Option<PathBuf> {
        let base = if record.is_relative() {
            // level 1 is the current package, each extra dot goes one up
            let mut dir = current_file.parent()?.to_path_buf();
            for _ in 1..record.level {
                dir = parent_dir(&dir)?.to_path_buf();
            }
            dir
        } else {
            self.project_root.clone()?
        };

        if record.module.is_empty() {
            return None;
        }

        let module_path = join_dotted(&base, &record.module);
        tracing::trace!("looking up {} for {}", module_path.display(), record.dotted_spec());
        Self::find_module_file(&module_path)
    }
}
