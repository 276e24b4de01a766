use crate::errors::{DepwalkError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Marker file that turns a Python directory into a package.
pub const PYTHON_PACKAGE_MARKER: &str = "__init__.py";

/// One import statement as found in source, later filled in with its resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportRecord {
    #[serde(rename = "type")]
    pub kind: ImportKind,
    /// Module identifier as written in source (dotted for both Python and Java)
    pub module: String,
    /// Names brought into scope, in source order
    pub names: Vec<String>,
    /// Directory levels to ascend for relative imports; 0 for absolute imports
    pub level: usize,
    pub is_local: bool,
    pub resolved_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    /// `import a.b` (Python) / `import a.b.C;` (Java)
    Import,
    /// `from a.b import x` and `from .a import x`
    FromImport,
    /// `from . import x`, one record per imported name
    RelativeImport,
}

impl ImportRecord {
    pub fn new(kind: ImportKind, module: impl Into<String>, names: Vec<String>, level: usize) -> Self {
        Self {
            kind,
            module: module.into(),
            names,
            level,
            is_local: false,
            resolved_path: None,
        }
    }

    /// The import as it would be spelled after `from`, e.g. `..pkg.mod` or `.x`.
    pub fn dotted_spec(&self) -> String {
        format!("{}{}", ".".repeat(self.level), self.module)
    }

    pub fn is_relative(&self) -> bool {
        self.level > 0
    }
}

/// Check if a directory is a Python package (contains `__init__.py`).
pub fn is_python_package(dir: &Path) -> bool {
    dir.join(PYTHON_PACKAGE_MARKER).is_file()
}

/// Read a source file as UTF-8, mapping failures to a parse error for that file.
pub fn read_source(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| DepwalkError::parse(path, e.to_string()))?;
    String::from_utf8(bytes)
        .map_err(|e| DepwalkError::parse(path, format!("file is not valid UTF-8: {e}")))
}

/// Parse `source` with a fresh tree-sitter parser for `language`.
pub fn parse_tree(
    language: &tree_sitter::Language,
    source: &str,
    file: &Path,
) -> Result<tree_sitter::Tree> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(language)
        .map_err(|e| DepwalkError::parse(file, format!("failed to load grammar: {e}")))?;
    parser
        .parse(source, None)
        .ok_or_else(|| DepwalkError::parse(file, "parser produced no syntax tree"))
}

/// First ERROR or MISSING node in document order.
pub fn first_syntax_error(node: tree_sitter::Node) -> Option<tree_sitter::Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_syntax_error)
}

/// Source text of a node with interior whitespace removed (`a . b` → `a.b`).
pub fn compact_text(node: tree_sitter::Node, source: &str) -> String {
    node.utf8_text(source.as_bytes())
        .unwrap_or_default()
        .split_whitespace()
        .collect()
}

/// Join dot-separated module segments onto `base` as path components.
pub fn join_dotted(base: &Path, module: &str) -> PathBuf {
    module
        .split('.')
        .filter(|segment| !segment.is_empty())
        .fold(base.to_path_buf(), |path, segment| path.join(segment))
}
