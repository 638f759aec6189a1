//! Error types.
//!
//! `ApiError` covers process-level failures (configuration, tree documents,
//! transport). `ShellError` covers the per-command outcomes an interpreter
//! turn can report; it never outlives a single dispatch.

use std::path::PathBuf;
use thiserror::Error;

/// Process-level error
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed tree document: {0}")]
    TreeDocument(#[from] serde_json::Error),

    #[error("Invalid tree: {0}")]
    InvalidTree(String),

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to fetch tree: {0}")]
    Fetch(String),

    #[error("Watch error: {0}")]
    Watch(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

/// Outcome of a failed interpreter command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShellError {
    #[error("No file specified")]
    MissingArgument,

    #[error("No such file or directory: {0}")]
    NoSuchPath(String),

    #[error("No such file: {0}")]
    NoSuchFile(String),

    #[error("No such directory: {0}")]
    NoSuchDirectory(String),

    #[error("Not a file: {0}")]
    NotAFile(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("No parent directory")]
    NoParentDirectory,

    #[error("System not ready")]
    SystemNotReady,

    #[error("Command not found: {0}")]
    UnrecognizedCommand(String),

    #[error("File system unavailable: {0}")]
    FileSystemUnavailable(String),
}
