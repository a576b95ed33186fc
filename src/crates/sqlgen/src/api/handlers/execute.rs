//! SQL execution endpoint handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::api::{
    error::ApiResult,
    models::{ExecuteSqlRequest, ExecuteSqlResponse},
    routes::AppState,
};

/// Run a statement against the warehouse and return its rows
///
/// POST /api/execute-sql
pub async fn execute_sql(
    State(app_state): State<AppState>,
    payload: Result<Json<ExecuteSqlRequest>, JsonRejection>,
) -> ApiResult<Json<ExecuteSqlResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    let result = app_state.executor.query(&req.sql).await?;
    tracing::info!(rows = result.row_count(), "Executed SQL");

    Ok(Json(ExecuteSqlResponse {
        result: result.rows,
        success: true,
    }))
}
