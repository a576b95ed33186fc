//! Request and response bodies for the REST endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::error::ApiResult;
use crate::api::middleware::validation::{validate_not_blank, validate_table_name};
use crate::judge::{BatchSummary, Evaluation, JudgeVerdict};

/// POST /api/generate-sql
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateSqlRequest {
    /// Natural-language question
    pub prompt: String,
    /// Table the query should target
    pub table_name: String,
}

impl GenerateSqlRequest {
    pub fn validate(&self) -> ApiResult<()> {
        validate_table_name(&self.table_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateSqlResponse {
    pub sql: String,
    pub success: bool,
}

/// POST /api/execute-sql
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteSqlRequest {
    pub sql: String,
}

impl ExecuteSqlRequest {
    pub fn validate(&self) -> ApiResult<()> {
        validate_not_blank(&self.sql, "sql")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteSqlResponse {
    /// One JSON array of column values per row
    pub result: Vec<Vec<Value>>,
    pub success: bool,
}

/// POST /api/judge-query. `prompt` may be omitted.
pub type JudgeQueryRequest = Evaluation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeQueryResponse {
    pub score: f64,
    pub semantic_match: bool,
    pub reasoning: String,
    pub success: bool,
}

impl From<JudgeVerdict> for JudgeQueryResponse {
    fn from(verdict: JudgeVerdict) -> Self {
        Self {
            score: verdict.score,
            semantic_match: verdict.semantic_match,
            reasoning: verdict.reasoning,
            success: true,
        }
    }
}

/// POST /api/judge-batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchJudgeRequest {
    pub evaluations: Vec<Evaluation>,
}

/// One entry of a batch response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeResult {
    pub score: f64,
    pub semantic_match: bool,
    pub reasoning: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchJudgeResponse {
    pub results: Vec<JudgeResult>,
    pub average_score: f64,
    pub semantic_match_rate: f64,
    pub success: bool,
}

impl From<BatchSummary> for BatchJudgeResponse {
    fn from(summary: BatchSummary) -> Self {
        Self {
            results: summary
                .verdicts
                .into_iter()
                .map(|v| JudgeResult {
                    score: v.score,
                    semantic_match: v.semantic_match,
                    reasoning: v.reasoning,
                })
                .collect(),
            average_score: summary.average_score,
            semantic_match_rate: summary.semantic_match_rate,
            success: true,
        }
    }
}

/// GET /health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            version: crate::VERSION.to_string(),
        }
    }
}

/// GET /api/health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseHealthResponse {
    pub status: String,
    pub warehouse: String,
}

impl WarehouseHealthResponse {
    pub fn new(status: impl Into<String>, warehouse: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            warehouse: warehouse.into(),
        }
    }
}
