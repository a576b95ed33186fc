//! Request timeout handling
//!
//! Requests that outlive the server timeout are answered with the usual
//! error envelope instead of a bare status.

use axum::BoxError;
use tower::timeout::error::Elapsed;

use crate::api::error::ApiError;

/// Convert an error from the timeout layer into an API error
pub async fn handle_timeout_error(err: BoxError) -> ApiError {
    if err.is::<Elapsed>() {
        ApiError::InternalError("request timed out".to_string())
    } else {
        ApiError::InternalError(format!("unhandled middleware error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_elapsed_maps_to_internal_error() {
        let err = handle_timeout_error(Box::new(Elapsed::new())).await;
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Internal server error: request timed out");
    }
}
