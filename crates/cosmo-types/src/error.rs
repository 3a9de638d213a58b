use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransferError {
    #[error("Precondition violated: {0}")]
    Precondition(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Malformed transfer table '{}': {message}", path.display())]
    FileFormat { path: PathBuf, message: String },

    #[error("Numerical integration failed: {0}")]
    NumericalIntegration(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TransferError {
    pub fn file_format(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        TransferError::FileFormat {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type TransferResult<T> = Result<T, TransferError>;

/// Reject a wavenumber that no transfer model can be evaluated at.
pub fn check_wavenumber(k: f64) -> TransferResult<()> {
    if !k.is_finite() || k <= 0.0 {
        return Err(TransferError::Precondition(format!(
            "wavenumber must be finite and positive, got k = {k}"
        )));
    }
    Ok(())
}
