//! REST API layer
//!
//! Endpoints:
//! - `POST /api/generate-sql` natural language to SQL
//! - `POST /api/execute-sql` run SQL against the warehouse
//! - `POST /api/judge-query` and `POST /api/judge-batch` score generated SQL
//! - `GET /health` and `GET /api/health` liveness and warehouse reachability

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;

pub use error::{ApiError, ApiErrorResponse, ApiResult};
pub use routes::{create_router, AppState};
