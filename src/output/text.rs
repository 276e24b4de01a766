use crate::analysis::FileAnalysisResult;
use crate::errors::Result;
use crate::graph::ir::{DependencyEntry, DependencyTree, TreeReport};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write a single-file analysis as a human-readable report.
pub fn write_analysis_text<W: Write>(writer: &mut W, result: &FileAnalysisResult) -> Result<()> {
    let root = result.project_root.as_deref();

    writeln!(writer, "Import Analysis")?;
    writeln!(writer, "===============")?;
    writeln!(writer)?;
    writeln!(writer, "File:      {}", result.filepath.display())?;
    writeln!(
        writer,
        "Language:  {}",
        result.language.as_deref().unwrap_or("(unknown)")
    )?;
    match root {
        Some(root) => writeln!(writer, "Root:      {}", root.display())?,
        None => writeln!(writer, "Root:      (none)")?,
    }

    if let Some(ref error) = result.error {
        writeln!(writer, "Error:     {error}")?;
        return Ok(());
    }
    writeln!(writer, "Imports:   {} statements", result.import_details.len())?;

    let local: Vec<String> = result
        .local_imports
        .iter()
        .map(|p| display_path(p, root))
        .collect();
    write_section(writer, "Local imports", &local)?;
    let external: Vec<String> = result.external_imports.iter().cloned().collect();
    write_section(writer, "External imports", &external)?;
    if !result.unresolved_imports.is_empty() {
        let unresolved: Vec<String> = result.unresolved_imports.iter().cloned().collect();
        write_section(writer, "Unresolved imports", &unresolved)?;
    }

    Ok(())
}

/// Write a dependency tree with box-drawing connectors.
pub fn write_tree_text<W: Write>(writer: &mut W, report: &TreeReport) -> Result<()> {
    let tree = match report {
        TreeReport::Built(tree) => tree,
        TreeReport::Failed(result) => return write_analysis_text(writer, result),
    };
    let DependencyTree {
        root,
        project_root,
        max_depth,
        total_files,
        tree: entry,
    } = tree;
    let base = project_root.as_deref();

    writeln!(writer, "{}{}", display_path(root, base), annotation(entry))?;
    if let DependencyEntry::Node(node) = entry {
        write_children(writer, &node.dependencies, "", base)?;
    }
    writeln!(writer)?;
    writeln!(
        writer,
        "{total_files} files analyzed (max depth {max_depth})"
    )?;
    Ok(())
}

fn write_children<W: Write>(
    writer: &mut W,
    deps: &BTreeMap<PathBuf, DependencyEntry>,
    prefix: &str,
    base: Option<&Path>,
) -> Result<()> {
    let count = deps.len();
    for (i, (path, entry)) in deps.iter().enumerate() {
        let last = i + 1 == count;
        let connector = if last { "└── " } else { "├── " };
        writeln!(
            writer,
            "{prefix}{connector}{}{}",
            display_path(path, base),
            annotation(entry)
        )?;
        if let DependencyEntry::Node(node) = entry {
            let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
            write_children(writer, &node.dependencies, &child_prefix, base)?;
        }
    }
    Ok(())
}

fn write_section<W: Write>(writer: &mut W, title: &str, items: &[String]) -> Result<()> {
    let heading = format!("{title} ({})", items.len());
    writeln!(writer)?;
    writeln!(writer, "{heading}")?;
    writeln!(writer, "{:-<width$}", "", width = heading.len())?;
    for item in items {
        writeln!(writer, "  {item}")?;
    }
    Ok(())
}

fn annotation(entry: &DependencyEntry) -> String {
    match entry {
        DependencyEntry::Node(_) => String::new(),
        DependencyEntry::Error(result) => format!(
            " (error: {})",
            result.error.as_deref().unwrap_or("unknown")
        ),
        DependencyEntry::Truncated { .. } => " (truncated)".to_string(),
        DependencyEntry::Circular { .. } => " (circular)".to_string(),
    }
}

/// Paths under the project root are shown relative to it.
fn display_path(path: &Path, base: Option<&Path>) -> String {
    base.and_then(|b| path.strip_prefix(b).ok())
        .filter(|rel| !rel.as_os_str().is_empty())
        .unwrap_or(path)
        .display()
        .to_string()
}
