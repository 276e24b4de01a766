pub mod builder;
pub mod ir;

pub use builder::{build_dependency_tree, TreeBuilder};
pub use ir::{DependencyEntry, DependencyNode, DependencyTree, TreeReport};
