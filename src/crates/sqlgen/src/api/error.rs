//! API error types and HTTP response conversion
//!
//! Every failure leaves the service as `{error, success: false}`. Bad input
//! maps to 422, everything else to 500.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::SqlGenError;

/// Body of every failed response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Always false
    pub success: bool,
}

impl ApiErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            success: false,
        }
    }
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// Custom API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// A field failed validation
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// Body is not JSON or lacks required fields
    #[error("Invalid request body: {0}")]
    JsonError(String),

    /// Generation, execution or judging failed
    #[error(transparent)]
    Pipeline(#[from] SqlGenError),

    /// Internal server error
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) | ApiError::JsonError(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Pipeline(_) | ApiError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error code identifier
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
            ApiError::JsonError(_) => "JSON_ERROR",
            ApiError::Pipeline(SqlGenError::Llm(_)) => "LLM_ERROR",
            ApiError::Pipeline(SqlGenError::Warehouse(_)) => "WAREHOUSE_ERROR",
            ApiError::Pipeline(_) => "PIPELINE_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// The provider error behind this failure, if any.
    pub fn llm_error(&self) -> Option<&llm::LlmError> {
        match self {
            ApiError::Pipeline(SqlGenError::Llm(e)) => Some(e),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self.llm_error() {
            Some(e) => tracing::error!(
                status = status.as_u16(),
                code = self.code(),
                retryable = e.is_retryable(),
                auth = e.is_auth_error(),
                "API Error: {}",
                self
            ),
            None => tracing::error!(status = status.as_u16(), code = self.code(), "API Error: {}", self),
        }

        let body = ApiErrorResponse::new(self.to_string());
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::JsonError(rejection.body_text())
    }
}

impl From<llm::LlmError> for ApiError {
    fn from(err: llm::LlmError) -> Self {
        ApiError::Pipeline(err.into())
    }
}

impl From<warehouse::WarehouseError> for ApiError {
    fn from(err: warehouse::WarehouseError) -> Self {
        ApiError::Pipeline(err.into())
    }
}
