//! ClickHouse client over the HTTP interface.
//!
//! # Example
//!
//! ```rust,ignore
//! use warehouse::{ClickHouseClient, ConnectionConfig, QueryExecutor, SchemaSource};
//!
//! let client = ClickHouseClient::new(ConnectionConfig::from_env()?)?;
//! let schema = client.table_schema("orders").await?;
//! let result = client.query("SELECT count() FROM orders").await?;
//! ```

use crate::config::ConnectionConfig;
use crate::error::{Result, WarehouseError};
use crate::result::QueryResult;
use crate::schema::{columns_from_result, schema_lookup, ColumnInfo};
use async_trait::async_trait;
use reqwest::Client;

/// Runs SQL against the warehouse.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Execute one statement and return its rows.
    async fn query(&self, sql: &str) -> Result<QueryResult>;

    /// Check that the server is reachable.
    async fn ping(&self) -> Result<()>;
}

/// Looks up table columns.
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// Columns of `table_name` (plain or `database.table`); an unknown table
    /// yields an empty list.
    async fn table_schema(&self, table_name: &str) -> Result<Vec<ColumnInfo>>;
}

/// ClickHouse HTTP-interface client.
#[derive(Clone)]
pub struct ClickHouseClient {
    config: ConnectionConfig,
    client: Client,
}

impl ClickHouseClient {
    pub fn new(config: ConnectionConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| WarehouseError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Execute `sql` with server-side parameters bound as `param_<name>`.
    pub async fn query_with_params(
        &self,
        sql: &str,
        params: &[(&str, &str)],
    ) -> Result<QueryResult> {
        let statement = strip_terminator(sql);

        let mut query: Vec<(String, String)> = vec![
            ("default_format".into(), "JSONCompact".into()),
            ("output_format_json_quote_64bit_integers".into(), "0".into()),
        ];
        if let Some(database) = &self.config.database {
            query.push(("database".into(), database.clone()));
        }
        for (name, value) in params {
            query.push((format!("param_{}", name), (*value).to_string()));
        }

        tracing::debug!(host = %self.config.host, sql = %statement, "Executing ClickHouse query");

        let response = self
            .client
            .post(self.config.base_url())
            .query(&query)
            .header("X-ClickHouse-User", &self.config.username)
            .header("X-ClickHouse-Key", &self.config.password)
            .body(statement.to_string())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(WarehouseError::QueryError {
                status: status.as_u16(),
                message: body.trim().to_string(),
            });
        }

        QueryResult::from_json_compact(&body)
    }
}

#[async_trait]
impl QueryExecutor for ClickHouseClient {
    async fn query(&self, sql: &str) -> Result<QueryResult> {
        self.query_with_params(sql, &[]).await
    }

    async fn ping(&self) -> Result<()> {
        let url = format!("{}ping", self.config.base_url());
        let response = self.client.get(&url).send().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(WarehouseError::QueryError {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            })
        }
    }
}

#[async_trait]
impl SchemaSource for ClickHouseClient {
    async fn table_schema(&self, table_name: &str) -> Result<Vec<ColumnInfo>> {
        let lookup = schema_lookup(table_name, self.config.database.is_some());
        let result = self.query_with_params(lookup.sql, &lookup.params).await?;
        columns_from_result(&result)
    }
}

/// Drop trailing whitespace and statement terminators.
fn strip_terminator(sql: &str) -> &str {
    sql.trim().trim_end_matches(|c: char| c == ';' || c.is_whitespace())
}
