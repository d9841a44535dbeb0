//! Error types for the mindcare-chat library.
//!
//! This module provides custom error types using `thiserror`. Lookups by an
//! unknown contact or conversation id are deliberately not represented here:
//! the store treats them as no-ops.

use thiserror::Error;

/// Errors that can occur in the mindcare-chat library.
#[derive(Error, Debug)]
pub enum ChatError {
    /// Outbound message text failed validation
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    /// Search query failed validation
    #[error("Invalid search query: {0}")]
    InvalidQuery(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Role string not recognised
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Priority string not recognised
    #[error("Unknown priority: {0}")]
    UnknownPriority(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// General error with context
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Result with `ChatError`
pub type Result<T> = std::result::Result<T, ChatError>;

impl From<anyhow::Error> for ChatError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<config::ConfigError> for ChatError {
    fn from(err: config::ConfigError) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}
