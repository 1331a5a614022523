//! Error types for taskpad.

use thiserror::Error;

/// Errors that can occur in taskpad operations.
#[derive(Error, Debug)]
pub enum TaskpadError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Folder '{0}' is built in and cannot be deleted")]
    ReservedFolder(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for taskpad operations.
pub type TaskpadResult<T> = Result<T, TaskpadError>;
