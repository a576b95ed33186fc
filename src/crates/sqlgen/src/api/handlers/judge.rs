//! Judge endpoint handlers

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::api::{
    error::ApiResult,
    models::{BatchJudgeRequest, BatchJudgeResponse, JudgeQueryRequest, JudgeQueryResponse},
    routes::AppState,
};

/// Score one generated query against its ground truth
///
/// POST /api/judge-query
pub async fn judge_query(
    State(app_state): State<AppState>,
    payload: Result<Json<JudgeQueryRequest>, JsonRejection>,
) -> ApiResult<Json<JudgeQueryResponse>> {
    let Json(req) = payload?;

    let verdict = app_state
        .judge
        .judge(&req.generated_query, &req.ground_truth_query, &req.prompt)
        .await?;

    Ok(Json(verdict.into()))
}

/// Score a list of pairs and aggregate
///
/// POST /api/judge-batch
pub async fn judge_batch(
    State(app_state): State<AppState>,
    payload: Result<Json<BatchJudgeRequest>, JsonRejection>,
) -> ApiResult<Json<BatchJudgeResponse>> {
    let Json(req) = payload?;

    let summary = app_state.judge.judge_batch(&req.evaluations).await?;
    tracing::info!(
        evaluations = req.evaluations.len(),
        average_score = summary.average_score,
        "Judged batch"
    );

    Ok(Json(summary.into()))
}
