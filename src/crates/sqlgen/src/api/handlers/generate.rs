//! SQL generation endpoint handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::api::{
    error::ApiResult,
    models::{GenerateSqlRequest, GenerateSqlResponse},
    routes::AppState,
};

/// Turn a natural-language prompt into one grammar-constrained statement
///
/// POST /api/generate-sql
pub async fn generate_sql(
    State(app_state): State<AppState>,
    payload: Result<Json<GenerateSqlRequest>, JsonRejection>,
) -> ApiResult<Json<GenerateSqlResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    let generated = app_state
        .generator
        .generate(&req.prompt, &req.table_name)
        .await?;

    Ok(Json(GenerateSqlResponse {
        sql: generated.sql,
        success: true,
    }))
}
