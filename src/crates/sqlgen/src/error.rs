//! Errors raised by the generation and judging pipeline.

use thiserror::Error;

/// Result type for sqlgen operations.
pub type Result<T> = std::result::Result<T, SqlGenError>;

/// Errors that can occur while generating, executing or judging SQL.
#[derive(Debug, Error)]
pub enum SqlGenError {
    /// The model call failed.
    #[error(transparent)]
    Llm(#[from] llm::LlmError),

    /// The warehouse call failed.
    #[error(transparent)]
    Warehouse(#[from] warehouse::WarehouseError),

    /// The model answered without any SQL.
    #[error("Model returned an empty query")]
    EmptyGeneration,

    /// Startup configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<utils::UtilsError> for SqlGenError {
    fn from(err: utils::UtilsError) -> Self {
        SqlGenError::Config(err.to_string())
    }
}
