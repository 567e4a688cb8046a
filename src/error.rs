// src/error.rs
use pdfext_core::CoreError;
use thiserror::Error;

/// Errors surfaced by the command-line tool.
#[derive(Error, Debug)]
pub enum StampError {
    #[error("Invalid arguments: {0}")]
    Usage(String),

    #[error(transparent)]
    Extension(#[from] CoreError),

    #[error("The engine refused to store the appearance string")]
    Rejected,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
