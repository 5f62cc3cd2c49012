//! Error types for the deadline catalogue.

use thiserror::Error;

/// Errors that can occur while loading, persisting or configuring the catalogue.
#[derive(Error, Debug)]
pub enum DeadlineError {
    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for deadline operations.
pub type DeadlineResult<T> = Result<T, DeadlineError>;
