use crate::analysis::FileAnalysisResult;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

pub const MAX_DEPTH_REACHED: &str = "max_depth_reached";

/// A successfully analyzed file and the entries for its local imports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyNode {
    pub filepath: PathBuf,
    pub language: Option<String>,
    pub local_imports: BTreeSet<PathBuf>,
    pub external_imports: BTreeSet<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub unresolved_imports: BTreeSet<String>,
    /// Keyed by the resolved path of each local import
    pub dependencies: BTreeMap<PathBuf, DependencyEntry>,
}

impl DependencyNode {
    pub fn from_analysis(result: FileAnalysisResult) -> Self {
        Self {
            filepath: result.filepath,
            language: result.language,
            local_imports: result.local_imports,
            external_imports: result.external_imports,
            unresolved_imports: result.unresolved_imports,
            dependencies: BTreeMap::new(),
        }
    }
}

/// One position in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DependencyEntry {
    Node(DependencyNode),
    /// The file could not be analyzed; siblings are unaffected
    Error(FileAnalysisResult),
    Truncated { truncated: bool, reason: String },
    /// The path was already expanded elsewhere in this build
    Circular { circular: bool },
}

impl DependencyEntry {
    pub fn truncated() -> Self {
        DependencyEntry::Truncated {
            truncated: true,
            reason: MAX_DEPTH_REACHED.to_string(),
        }
    }

    pub fn circular() -> Self {
        DependencyEntry::Circular { circular: true }
    }

    pub fn as_node(&self) -> Option<&DependencyNode> {
        match self {
            DependencyEntry::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn is_circular(&self) -> bool {
        matches!(self, DependencyEntry::Circular { .. })
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self, DependencyEntry::Truncated { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyTree {
    pub root: PathBuf,
    pub project_root: Option<PathBuf>,
    pub max_depth: usize,
    pub total_files: usize,
    pub tree: DependencyEntry,
}

/// Outcome of a tree build: a tree, or the analysis error for a root file
/// no parser handles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TreeReport {
    Built(DependencyTree),
    Failed(FileAnalysisResult),
}
