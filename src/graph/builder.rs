use crate::analysis::{analyze_imports, FileAnalysisResult};
use crate::graph::ir::{DependencyEntry, DependencyNode, DependencyTree, TreeReport};
use crate::parse::ParserRegistry;
use crate::walk::normalize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Builds a dependency tree depth-first from one root file.
///
/// The visited set spans the whole build: the first time a path is reached it
/// is expanded, every later occurrence becomes a circular marker, whether or
/// not it actually closes a cycle.
pub struct TreeBuilder<'a> {
    registry: &'a ParserRegistry,
    project_root: Option<PathBuf>,
    max_depth: usize,
    visited: HashSet<PathBuf>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(registry: &'a ParserRegistry, max_depth: usize, project_root: Option<&Path>) -> Self {
        Self {
            registry,
            project_root: project_root.map(normalize),
            max_depth,
            visited: HashSet::new(),
        }
    }

    /// Consume the builder and produce the report for `filepath`.
    pub fn build(mut self, filepath: &Path) -> TreeReport {
        if !self.registry.supports(filepath) {
            let result = analyze_imports(self.registry, filepath, self.project_root.as_deref());
            return TreeReport::Failed(result);
        }

        let root = normalize(filepath);
        self.visited.insert(root.clone());
        let result = analyze_imports(self.registry, &root, self.project_root.as_deref());
        let project_root = self
            .project_root
            .clone()
            .or_else(|| result.project_root.clone());
        let tree = self.expand_analysis(result, 0);

        tracing::debug!(
            "tree for {}: {} files (max depth {})",
            root.display(),
            self.visited.len(),
            self.max_depth
        );

        TreeReport::Built(DependencyTree {
            root,
            project_root,
            max_depth: self.max_depth,
            total_files: self.visited.len(),
            tree,
        })
    }

    fn expand(&mut self, path: &Path, depth: usize) -> DependencyEntry {
        if depth > self.max_depth {
            return DependencyEntry::truncated();
        }
        if !self.visited.insert(path.to_path_buf()) {
            tracing::trace!("{} already expanded", path.display());
            return DependencyEntry::circular();
        }
        let result = analyze_imports(self.registry, path, self.project_root.as_deref());
        self.expand_analysis(result, depth)
    }

    fn expand_analysis(&mut self, result: FileAnalysisResult, depth: usize) -> DependencyEntry {
        if !result.is_success() {
            return DependencyEntry::Error(result);
        }
        let mut node = DependencyNode::from_analysis(result);
        let children: Vec<PathBuf> = node.local_imports.iter().cloned().collect();
        for child in children {
            let entry = self.expand(&child, depth + 1);
            node.dependencies.insert(child, entry);
        }
        DependencyEntry::Node(node)
    }
}

/// Build the dependency tree rooted at `filepath`, expanding local imports up
/// to `max_depth` levels below the root.
pub fn build_dependency_tree(
    registry: &ParserRegistry,
    filepath: &Path,
    max_depth: usize,
    project_root: Option<&Path>,
) -> TreeReport {
    TreeBuilder::new(registry, max_depth, project_root).build(filepath)
}
