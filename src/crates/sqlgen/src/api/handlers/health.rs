//! Health check endpoint handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::api::{
    models::{HealthResponse, WarehouseHealthResponse},
    routes::AppState,
};

/// Handler for GET /health
///
/// Liveness only, no external calls.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Handler for GET /api/health
///
/// Pings the warehouse.
pub async fn health_detailed(
    State(app_state): State<AppState>,
) -> (StatusCode, Json<WarehouseHealthResponse>) {
    match app_state.executor.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(WarehouseHealthResponse::new("ok", "connected")),
        ),
        Err(e) => {
            tracing::warn!("Warehouse health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(WarehouseHealthResponse::new("error", "unreachable")),
            )
        }
    }
}
