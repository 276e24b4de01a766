pub mod provenance;
pub mod resolve;
pub mod schema;
pub mod show;

use crate::output::OutputFormat;
use crate::parse::java::DEFAULT_SKIP_DIRS;
use provenance::ProvenanceMap;
use std::path::PathBuf;

/// Dependency-tree depth used when neither config nor flags set one.
pub const DEFAULT_MAX_DEPTH: usize = 2;

/// Fully resolved configuration, no Option fields.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub format: OutputFormat,
    pub max_depth: usize,

    // Language-specific
    pub java: ResolvedJavaConfig,

    // Provenance
    pub provenance: ProvenanceMap,
    pub loaded_files: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ResolvedJavaConfig {
    /// Directory-name globs pruned from the source-root search
    pub skip_dirs: Vec<String>,
    /// Extra source roots relative to the project root
    pub source_roots: Vec<String>,
}

impl Default for ResolvedJavaConfig {
    fn default() -> Self {
        Self {
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|s| s.to_string()).collect(),
            source_roots: Vec::new(),
        }
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            java: ResolvedJavaConfig::default(),
            provenance: ProvenanceMap::default(),
            loaded_files: Vec::new(),
        }
    }
}
