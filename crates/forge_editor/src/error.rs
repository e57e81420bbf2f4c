//! Error types for the editor module.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors raised by editor operations.
///
/// None of these leave the buffer partially modified.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("No file loaded!")]
    NoFileLoaded,

    #[error("File {0} not found!")]
    FileNotFound(String),

    #[error("Path escapes the project root: {0}")]
    OutsideRoot(PathBuf),

    #[error("Invalid line number! Valid range: {min}-{max}")]
    InvalidLine { line: usize, min: usize, max: usize },

    #[error("Invalid line range! Valid range: 1-{max}")]
    InvalidRange { start: usize, end: usize, max: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Lint error: {0}")]
    Lint(#[from] forge_lint::LintError),
}

/// Malformed command input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid command. Type 'help' for available commands.")]
    Unknown(String),

    #[error("Invalid line number!")]
    InvalidNumber(String),
}
