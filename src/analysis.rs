use crate::errors::DepwalkError;
use crate::parse::{ImportRecord, LanguageParser, ParserRegistry};
use crate::walk::{absolutize, dotted_extension, normalize};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Success,
    Error,
}

/// Imports of one file, resolved and split into local and external.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileAnalysisResult {
    pub filepath: PathBuf,
    pub project_root: Option<PathBuf>,
    pub local_imports: BTreeSet<PathBuf>,
    pub external_imports: BTreeSet<String>,
    /// Relative imports that point at nothing on disk, spelled `.x` / `..pkg.mod`
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub unresolved_imports: BTreeSet<String>,
    pub import_details: Vec<ImportRecord>,
    pub status: AnalysisStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub language: Option<String>,
}

impl FileAnalysisResult {
    pub fn failure(
        filepath: PathBuf,
        project_root: Option<PathBuf>,
        language: Option<&str>,
        error: &DepwalkError,
    ) -> Self {
        Self {
            filepath,
            project_root,
            local_imports: BTreeSet::new(),
            external_imports: BTreeSet::new(),
            unresolved_imports: BTreeSet::new(),
            import_details: Vec::new(),
            status: AnalysisStatus::Error,
            error: Some(error.to_string()),
            language: language.map(str::to_string),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == AnalysisStatus::Success
    }
}

/// Analyze `filepath` with whichever registered parser claims its extension.
///
/// Never fails: unsupported extensions, missing files and unreadable sources
/// come back as results with `status: error`.
pub fn analyze_imports(
    registry: &ParserRegistry,
    filepath: &Path,
    project_root: Option<&Path>,
) -> FileAnalysisResult {
    let root = project_root.map(normalize);
    match registry.lookup(filepath, root.as_deref()) {
        Some(mut parser) => analyze_with(parser.as_mut(), filepath),
        None => {
            let extension = dotted_extension(filepath);
            let err = DepwalkError::UnsupportedFileType {
                extension: if extension.is_empty() {
                    "(none)".to_string()
                } else {
                    extension
                },
                supported: registry.supported_extensions(),
            };
            FileAnalysisResult::failure(absolutize(filepath), root, None, &err)
        }
    }
}

/// Run the analysis template over one file with a given parser.
///
/// Binds the parser to a discovered project root if it has none.
pub fn analyze_with(parser: &mut dyn LanguageParser, filepath: &Path) -> FileAnalysisResult {
    let language = parser.language();
    let abspath = absolutize(filepath);
    if !abspath.exists() {
        let err = DepwalkError::FileNotFound { path: abspath.clone() };
        let root = parser.project_root().map(Path::to_path_buf);
        return FileAnalysisResult::failure(abspath, root, Some(language), &err);
    }

    let filepath = normalize(&abspath);
    if parser.project_root().is_none() {
        let start = filepath.parent().unwrap_or(filepath.as_path()).to_path_buf();
        let root = parser.find_project_root(&start);
        parser.bind_project_root(root);
    }
    let project_root = parser.project_root().map(Path::to_path_buf);

    let mut records = match parser.parse_imports(&filepath) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!("{e}");
            return FileAnalysisResult::failure(filepath, project_root, Some(language), &e);
        }
    };

    let mut local_imports = BTreeSet::new();
    let mut external_imports = BTreeSet::new();
    let mut unresolved_imports = BTreeSet::new();

    for record in &mut records {
        record.resolved_path = parser.resolve_import_path(record, &filepath);
        record.is_local = parser.is_local_file(record.resolved_path.as_deref());

        match (&record.resolved_path, record.is_local) {
            (Some(path), true) => {
                local_imports.insert(path.clone());
            }
            (None, _) if record.is_relative() => {
                unresolved_imports.insert(record.dotted_spec());
            }
            _ => {
                external_imports.insert(record.module.clone());
            }
        }
    }

    tracing::debug!(
        "{}: {} imports ({} local, {} external, {} unresolved)",
        filepath.display(),
        records.len(),
        local_imports.len(),
        external_imports.len(),
        unresolved_imports.len()
    );

    FileAnalysisResult {
        filepath,
        project_root,
        local_imports,
        external_imports,
        unresolved_imports,
        import_details: records,
        status: AnalysisStatus::Success,
        error: None,
        language: Some(language.to_string()),
    }
}
