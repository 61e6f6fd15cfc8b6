use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that stop a run
#[derive(Debug, Error)]
pub enum AppError {
    #[error("could not open file {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Logging initialization failed: {0}")]
    Logging(String),
}

/// Why an EXTINF line could not be turned into an attribute record
///
/// Never fatal: the scanner logs it and moves on to the next pair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordParseError {
    #[error("line does not start with #EXTINF:")]
    MissingPrefix,

    #[error("failed to match extinf line: {line}")]
    StructureMismatch { line: String },
}

pub type Result<T> = std::result::Result<T, AppError>;
