//! Per-file import analysis and bounded dependency trees for Python and Java.
//!
//! ```no_run
//! use depwalk::{analyze_imports, ParserRegistry, ParserSettings};
//! use std::path::Path;
//!
//! let registry = ParserRegistry::with_defaults(&ParserSettings::default());
//! let result = analyze_imports(&registry, Path::new("pkg/a.py"), None);
//! for path in &result.local_imports {
//!     println!("{}", path.display());
//! }
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod errors;
pub mod graph;
pub mod output;
pub mod parse;
pub mod walk;

pub use analysis::{analyze_imports, analyze_with, AnalysisStatus, FileAnalysisResult};
pub use errors::{DepwalkError, Result};
pub use graph::{build_dependency_tree, DependencyEntry, DependencyNode, DependencyTree, TreeReport};
pub use parse::{ImportKind, ImportRecord, LanguageParser, ParserRegistry, ParserSettings};
