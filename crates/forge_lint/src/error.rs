//! Error types for the lint module.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for lint operations.
pub type LintResult<T> = Result<T, LintError>;

/// Errors that can occur while setting up or running validation.
///
/// Structural problems found inside project files are never errors; they are
/// reported as [`Diagnostic`](crate::Diagnostic)s.
#[derive(Error, Debug)]
pub enum LintError {
    #[error("Project root not found: {0}")]
    RootNotFound(PathBuf),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Invalid configuration in {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    #[error("Invalid exclude pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
