//! Grammar-constrained text-to-SQL over ClickHouse.
//!
//! The pipeline has three independent steps, each exposed as an endpoint:
//!
//! 1. [`SqlGenerator`] looks up the target table's columns and asks a model
//!    for one statement that conforms to [`grammar::ORDERS_SQL_GRAMMAR`].
//! 2. A [`warehouse::QueryExecutor`] runs SQL and returns the rows.
//! 3. [`QueryJudge`] asks a second model to score a generated query against a
//!    ground-truth query.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use llm::remote::OpenAiClient;
//! use sqlgen::{AppConfig, SqlGenerator};
//! use warehouse::ClickHouseClient;
//!
//! let config = AppConfig::from_env()?;
//! let warehouse = Arc::new(ClickHouseClient::new(config.warehouse)?);
//! let model = Arc::new(OpenAiClient::new(config.generation)?);
//!
//! let generator = SqlGenerator::new(warehouse, model);
//! let generated = generator.generate("orders over 100 since May", "orders").await?;
//! println!("{}", generated.sql);
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod generator;
pub mod grammar;
pub mod judge;
pub mod prompt;

pub use config::AppConfig;
pub use error::{Result, SqlGenError};
pub use generator::{GeneratedSql, SqlGenerator};
pub use judge::{parse_judge_reply, BatchSummary, Evaluation, JudgeVerdict, QueryJudge};

/// Crate version reported by `/health`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
