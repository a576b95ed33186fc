//! Query results decoded from ClickHouse's `JSONCompact` format.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name and ClickHouse type of a result column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMeta {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
}

/// Server-side execution statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryStatistics {
    pub elapsed: f64,
    pub rows_read: u64,
    pub bytes_read: u64,
}

/// Rows returned by a query, each row a list of column values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(rename = "meta", default)]
    pub columns: Vec<ColumnMeta>,
    #[serde(rename = "data", default)]
    pub rows: Vec<Vec<Value>>,
    #[serde(default)]
    pub statistics: Option<QueryStatistics>,
}

impl QueryResult {
    /// Decode a `JSONCompact` body. Statements without output reply with an
    /// empty body, which decodes to an empty result.
    pub fn from_json_compact(body: &str) -> Result<Self> {
        if body.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(body)?)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_json_compact() {
        let body = r#"{
            "meta": [{"name": "id", "type": "UInt64"}, {"name": "order_date", "type": "Date"}],
            "data": [[1, "2024-03-01"], [2, "2024-02-11"]],
            "rows": 2,
            "rows_before_limit_at_least": 2,
            "statistics": {"elapsed": 0.0012, "rows_read": 2, "bytes_read": 48}
        }"#;

        let result = QueryResult::from_json_compact(body).unwrap();
        assert_eq!(result.row_count(), 2);
        assert_eq!(result.columns[1].data_type, "Date");
        assert_eq!(result.rows[0], vec![json!(1), json!("2024-03-01")]);
        assert_eq!(result.columns[1].name, "order_date");
        assert_eq!(result.statistics.unwrap().rows_read, 2);
    }

    #[test]
    fn test_empty_body() {
        let result = QueryResult::from_json_compact("\n").unwrap();
        assert_eq!(result, QueryResult::default());
    }

    #[test]
    fn test_garbage_body() {
        assert!(QueryResult::from_json_compact("Ok.").is_err());
    }
}
