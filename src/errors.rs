use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum DepwalkError {
    #[error("Unsupported file type: {extension} (supported: {})", .supported.join(", "))]
    #[diagnostic(code(depwalk::unsupported_file_type))]
    UnsupportedFileType {
        extension: String,
        supported: Vec<String>,
    },

    #[error("File not found: {}", .path.display())]
    #[diagnostic(code(depwalk::file_not_found))]
    FileNotFound { path: PathBuf },

    #[error("Parse error in {}: {message}", .file.display())]
    #[diagnostic(code(depwalk::parse_error))]
    ParseError { file: PathBuf, message: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(depwalk::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(depwalk::io))]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(code(depwalk::json))]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(code(depwalk::glob))]
    Glob(#[from] globset::Error),
}

impl DepwalkError {
    pub fn parse(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        DepwalkError::ParseError {
            file: file.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DepwalkError>;
