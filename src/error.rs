//! Error types for toolpath arc fitting.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for arc fitting.
#[derive(Debug, Error)]
pub enum ArcFitError {
    #[error("Invalid point at index {index}: expected at least 2 components, got {components}")]
    InvalidPoint { index: usize, components: usize },

    #[error("Invalid value at point {index}: expected a number, got '{value}'")]
    InvalidValue { index: usize, value: String },

    #[error("Invalid value at point {index}: {value} is not finite")]
    NonFinite { index: usize, value: f64 },

    #[error("Expected a JSON array of {what}")]
    NotAnArray { what: &'static str },

    #[error("Empty file: {path}")]
    EmptyFile { path: PathBuf },

    #[error("Degenerate circle fit: {reason}")]
    DegenerateFit { reason: &'static str },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for arc fitting operations.
pub type Result<T> = std::result::Result<T, ArcFitError>;
