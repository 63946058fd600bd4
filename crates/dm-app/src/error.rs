//! Error types for the dm-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the engine crates and
/// provides a unified error interface for frontends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Scan error: {0}")]
    Scan(String),

    #[error("Failed to read request file: {path}")]
    RequestFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cache entry not found: {key}")]
    CacheMiss { key: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for dm-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from engine error types
impl From<dm_core::DmError> for AppError {
    fn from(err: dm_core::DmError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<dm_scan::SweepError> for AppError {
    fn from(err: dm_scan::SweepError) -> Self {
        AppError::Scan(err.to_string())
    }
}
