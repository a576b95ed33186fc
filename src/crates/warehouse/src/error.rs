//! Error types for warehouse access.

use thiserror::Error;

/// Result type for warehouse operations.
pub type Result<T> = std::result::Result<T, WarehouseError>;

/// Errors that can occur when talking to ClickHouse.
#[derive(Debug, Error)]
pub enum WarehouseError {
    /// HTTP request failed before a reply was received.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The server rejected the query.
    #[error("Query failed ({status}): {message}")]
    QueryError { status: u16, message: String },

    /// Connection settings are missing or malformed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The server replied with something other than the expected format.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<serde_json::Error> for WarehouseError {
    fn from(err: serde_json::Error) -> Self {
        WarehouseError::InvalidResponse(err.to_string())
    }
}

impl From<utils::UtilsError> for WarehouseError {
    fn from(err: utils::UtilsError) -> Self {
        WarehouseError::ConfigError(err.to_string())
    }
}
