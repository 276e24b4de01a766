pub mod common;
pub mod java;
pub mod python;
pub mod registry;

pub use common::{ImportKind, ImportRecord};
pub use registry::{ParserRegistry, ParserSettings};

use crate::errors::Result;
use crate::walk::normalize;
use std::path::{Path, PathBuf};

/// Language parser contract. Each supported language implements this.
///
/// An instance is bound to at most one project root. The registry hands out a
/// fresh instance per lookup, so implementations keep no state beyond that root
/// and caches derived from it.
pub trait LanguageParser {
    /// Identifying tag reported in analysis results (e.g. `"python"`).
    fn language(&self) -> &'static str;

    /// Extensions this parser claims, with the leading dot (e.g. `".py"`).
    fn file_extensions(&self) -> &'static [&'static str];

    /// The project root this instance is bound to, if any.
    fn project_root(&self) -> Option<&Path>;

    /// Bind the instance to a project root.
    fn bind_project_root(&mut self, root: PathBuf);

    /// Discover the project root by ascending from `start_dir`.
    fn find_project_root(&self, start_dir: &Path) -> PathBuf;

    /// Read `file` and extract its import statements in source order.
    /// `resolved_path` and `is_local` are left unset.
    fn parse_imports(&self, file: &Path) -> Result<Vec<ImportRecord>>;

    /// Map one import to a file on disk, or `None` if no candidate exists.
    fn resolve_import_path(&self, record: &ImportRecord, current_file: &Path) -> Option<PathBuf>;

    /// True iff `path` is present and lies under the bound project root.
    fn is_local_file(&self, path: Option<&Path>) -> bool {
        match (path, self.project_root()) {
            (Some(path), Some(root)) => normalize(path).starts_with(normalize(root)),
            _ => false,
        }
    }
}
