//! Error types for utility functions.

use thiserror::Error;

/// Result type for utility operations.
pub type Result<T> = std::result::Result<T, UtilsError>;

/// Errors that can occur in utility operations.
#[derive(Debug, Error)]
pub enum UtilsError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Server error.
    #[error("Server error: {0}")]
    ServerError(String),
}
