//! API route definitions

use axum::{
    error_handling::HandleErrorLayer,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower::timeout::TimeoutLayer;
use warehouse::QueryExecutor;

use crate::api::{handlers, middleware};
use crate::generator::SqlGenerator;
use crate::judge::QueryJudge;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<SqlGenerator>,
    pub executor: Arc<dyn QueryExecutor>,
    pub judge: Arc<QueryJudge>,
}

impl AppState {
    pub fn new(generator: SqlGenerator, executor: Arc<dyn QueryExecutor>, judge: QueryJudge) -> Self {
        Self {
            generator: Arc::new(generator),
            executor,
            judge: Arc::new(judge),
        }
    }
}

/// Build the complete API router. Requests running longer than
/// `request_timeout` fail with the 500 error envelope.
pub fn create_router(app_state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(handlers::health))
        .route("/api/health", get(handlers::health_detailed))
        // Pipeline endpoints
        .route("/api/generate-sql", post(handlers::generate_sql))
        .route("/api/execute-sql", post(handlers::execute_sql))
        .route("/api/judge-query", post(handlers::judge_query))
        .route("/api/judge-batch", post(handlers::judge_batch))
        .with_state(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::logging_layer())
                .layer(middleware::cors_layer())
                .layer(HandleErrorLayer::new(middleware::handle_timeout_error))
                .layer(TimeoutLayer::new(request_timeout)),
        )
}
