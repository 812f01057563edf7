//! Domain error types for numpick
//!
//! Provides structured error types for the picker and its host:
//! - `PickerError` for value model, text entry and configuration failures
//! - `Result` as the crate-wide alias

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for numpick
#[derive(Debug, Error)]
pub enum PickerError {
    #[error("Invalid range: min {min} cannot be greater than max {max}")]
    InvalidRange { min: i32, max: i32 },

    #[error("Invalid step size {0}: must be greater than zero")]
    InvalidStep(i32),

    #[error("At least one of min or max must be given")]
    MissingBounds,

    #[error("'{0}' is not a valid integer")]
    InvalidNumber(String),

    #[error("Config error in {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for PickerError
pub type Result<T> = std::result::Result<T, PickerError>;
