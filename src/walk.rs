use crate::errors::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Make `path` absolute against the process working directory.
/// Does not touch the filesystem, so it works for paths that do not exist.
pub fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Lower-case paths on platforms whose filesystems are case-insensitive.
pub fn normalize_case(path: &Path) -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(path.to_string_lossy().to_lowercase())
    } else {
        path.to_path_buf()
    }
}

/// Canonical form used for every path the analyzer reports or compares:
/// symlinks resolved when the path exists, absolute otherwise, case-normalized.
pub fn normalize(path: &Path) -> PathBuf {
    let abs = path.canonicalize().unwrap_or_else(|_| absolutize(path));
    normalize_case(&abs)
}

/// Parent of `dir`, or `None` once the filesystem root is reached
/// (a directory that is its own parent).
pub fn parent_dir(dir: &Path) -> Option<&Path> {
    dir.parent()
        .filter(|parent| !parent.as_os_str().is_empty() && *parent != dir)
}

/// Lower-cased extension of `path` including the leading dot, or an empty string.
pub fn dotted_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default()
}

/// Compile directory-name glob patterns.
pub fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

/// Find every directory called `name` under `root`.
///
/// - Respects `.gitignore`
/// - Does not descend into directories whose name matches `skip`
/// - Matches nested inside another match are kept
/// - Returns breadth-first order (shallower first, then sorted by path)
pub fn find_dirs_named(root: &Path, name: &str, skip: &GlobSet) -> Vec<PathBuf> {
    let skip = skip.clone();
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            !(is_dir && entry.depth() > 0 && skip.is_match(entry.file_name()))
        })
        .build();

    let mut found: Vec<(usize, PathBuf)> = Vec::new();
    for entry in walker.flatten() {
        if entry.depth() == 0 || !entry.file_type().is_some_and(|t| t.is_dir()) {
            continue;
        }
        if entry.file_name() == name {
            found.push((entry.depth(), entry.into_path()));
        }
    }

    found.sort();
    found.dedup();
    found.into_iter().map(|(_, path)| path).collect()
}
