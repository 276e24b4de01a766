use crate::errors::{DepwalkError, Result};
use crate::parse::common::{compact_text, join_dotted, parse_tree, read_source, ImportKind, ImportRecord};
use crate::parse::LanguageParser;
use crate::walk::{build_globset, find_dirs_named, normalize, parent_dir};
use globset::GlobSet;
use std::cell::OnceCell;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use streaming_iterator::StreamingIterator;

/// Files whose presence marks a Maven or Gradle project root.
pub const BUILD_FILES: &[&str] = &["pom.xml", "build.gradle", "build.gradle.kts"];

/// Directory name of the conventional source tree.
pub const SOURCE_DIR: &str = "src";

/// Directory name that holds Java packages inside a source tree.
const PACKAGE_ROOT_DIR: &str = "java";

const STANDARD_SOURCE_ROOTS: &[&str] = &["src/main/java", "src/test/java"];

pub const DEFAULT_SKIP_DIRS: &[&str] = &["target", "build", "out", ".gradle", ".git", "node_modules"];

const IMPORT_QUERY: &str = "(import_declaration) @import";

/// Resolution knobs shared by every Java parser a registry hands out.
#[derive(Debug, Clone)]
pub struct JavaSettings {
    /// Directory names never searched for source roots
    pub skip_dirs: GlobSet,
    /// Extra source roots, relative to the project root, tried after the standard ones
    pub source_roots: Vec<PathBuf>,
}

impl JavaSettings {
    pub fn new(skip_dirs: &[String], source_roots: &[String]) -> Result<Self> {
        Ok(Self {
            skip_dirs: build_globset(skip_dirs)?,
            source_roots: source_roots.iter().map(PathBuf::from).collect(),
        })
    }
}

impl Default for JavaSettings {
    fn default() -> Self {
        let skip: Vec<String> = DEFAULT_SKIP_DIRS.iter().map(|s| s.to_string()).collect();
        Self {
            skip_dirs: build_globset(&skip).unwrap_or_else(|_| GlobSet::empty()),
            source_roots: Vec::new(),
        }
    }
}

pub struct JavaParser {
    project_root: Option<PathBuf>,
    settings: Arc<JavaSettings>,
    /// Source roots under the bound project root, computed on first resolution
    source_roots: OnceCell<Vec<PathBuf>>,
}

impl JavaParser {
    pub fn new(project_root: Option<PathBuf>) -> Self {
        Self::with_settings(project_root, Arc::new(JavaSettings::default()))
    }

    pub fn with_settings(project_root: Option<PathBuf>, settings: Arc<JavaSettings>) -> Self {
        Self {
            project_root,
            settings,
            source_roots: OnceCell::new(),
        }
    }

    fn language_grammar() -> tree_sitter::Language {
        tree_sitter_java::LANGUAGE.into()
    }

    /// Scan source text for import declarations. Syntax errors elsewhere in
    /// the file are tolerated.
    pub fn extract_imports(&self, source: &str, file_path: &Path) -> Result<Vec<ImportRecord>> {
        let lang = Self::language_grammar();
        let tree = parse_tree(&lang, source, file_path)?;

        let query = tree_sitter::Query::new(&lang, IMPORT_QUERY)
            .map_err(|e| DepwalkError::parse(file_path, format!("bad import query: {e}")))?;

        let mut imports = Vec::new();
        let mut cursor = tree_sitter::QueryCursor::new();
        let mut matches = cursor.matches(&query, tree.root_node(), source.as_bytes());
        while let Some(m) = matches.next() {
            for capture in m.captures {
                if let Some(record) = Self::record_for(capture.node, source) {
                    imports.push(record);
                }
            }
        }
        Ok(imports)
    }

    /// `import [static] a.b.C[.*];` → module `a.b.C`, names `[C]`.
    fn record_for(node: tree_sitter::Node, source: &str) -> Option<ImportRecord> {
        let mut cursor = node.walk();
        let name_node = node
            .named_children(&mut cursor)
            .find(|c| matches!(c.kind(), "scoped_identifier" | "identifier"))?;
        let module = compact_text(name_node, source);
        if module.is_empty() {
            return None;
        }
        let last = module.rsplit('.').next().unwrap_or(&module).to_string();
        Some(ImportRecord::new(ImportKind::Import, module, vec![last], 0))
    }

    /// Candidate directories that hold package trees, in lookup order.
    fn source_roots(&self) -> &[PathBuf] {
        self.source_roots.get_or_init(|| {
            let Some(root) = self.project_root.as_deref() else {
                return Vec::new();
            };
            let mut roots: Vec<PathBuf> = Vec::new();
            let standard = STANDARD_SOURCE_ROOTS.iter().map(|rel| root.join(rel));
            let configured = self.settings.source_roots.iter().map(|rel| root.join(rel));
            for dir in standard.chain(configured) {
                if dir.is_dir() && !roots.contains(&dir) {
                    roots.push(dir);
                }
            }
            for dir in find_dirs_named(root, PACKAGE_ROOT_DIR, &self.settings.skip_dirs) {
                if !roots.contains(&dir) {
                    roots.push(dir);
                }
            }
            tracing::debug!("java source roots under {}: {:?}", root.display(), roots);
            roots
        })
    }
}

impl Default for JavaParser {
    fn default() -> Self {
        Self::new(None)
    }
}

impl LanguageParser for JavaParser {
    fn language(&self) -> &'static str {
        "java"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &[".java"]
    }

    fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    fn bind_project_root(&mut self, root: PathBuf) {
        self.project_root = Some(root);
        self.source_roots = OnceCell::new();
    }

    /// Nearest ancestor holding a build file, or the parent of the nearest
    /// `src` directory, whichever comes first.
    fn find_project_root(&self, start_dir: &Path) -> PathBuf {
        let mut current = start_dir;
        loop {
            if BUILD_FILES.iter().any(|f| current.join(f).is_file()) {
                tracing::debug!("java project root (build file): {}", current.display());
                return current.to_path_buf();
            }
            let parent = parent_dir(current);
            if current.file_name().is_some_and(|n| n == SOURCE_DIR) {
                if let Some(parent) = parent {
                    tracing::debug!("java project root (src dir): {}", parent.display());
                    return parent.to_path_buf();
                }
            }
            match parent {
                Some(p) => current = p,
                None => return start_dir.to_path_buf(),
            }
        }
    }

    fn parse_imports(&self, file: &Path) -> Result<Vec<ImportRecord>> {
        let source = read_source(file)?;
        self.extract_imports(&source, file)
    }

    fn resolve_import_path(&self, record: &ImportRecord, _current_file: &Path) -> Option<PathBuf> {
        if record.module.is_empty() {
            return None;
        }
        let mut relative: OsString = join_dotted(Path::new(""), &record.module).into_os_string();
        relative.push(".java");
        let relative = PathBuf::from(relative);

        self.source_roots()
            .iter()
            .map(|src| src.join(&relative))
            .find(|candidate| candidate.is_file())
            .map(|found| normalize(&found))
    }
}
