//! Table schema lookup through `information_schema.columns`.

use crate::error::{Result, WarehouseError};
use crate::result::QueryResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query parameter bound to the table name.
pub const TABLE_NAME_PARAM: &str = "table_name";

/// Query parameter bound to the database of a qualified table name.
pub const TABLE_SCHEMA_PARAM: &str = "table_schema";

/// Column listing for one table in any database.
pub const SCHEMA_QUERY: &str = "SELECT column_name, data_type, is_nullable, column_default \
     FROM information_schema.columns \
     WHERE table_name = {table_name:String}";

/// Column listing for one table in the session database.
pub const SCHEMA_QUERY_CURRENT_DB: &str = "SELECT column_name, data_type, is_nullable, column_default \
     FROM information_schema.columns \
     WHERE table_schema = currentDatabase() AND table_name = {table_name:String}";

/// Column listing for one table in a named database.
pub const SCHEMA_QUERY_IN_DB: &str = "SELECT column_name, data_type, is_nullable, column_default \
     FROM information_schema.columns \
     WHERE table_schema = {table_schema:String} AND table_name = {table_name:String}";

/// Statement and bound parameters for one schema lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaLookup<'a> {
    pub sql: &'static str,
    pub params: Vec<(&'static str, &'a str)>,
}

/// Build the lookup for `table_name`, which may be `database.table`.
///
/// An unqualified name is restricted to the session database when
/// `in_current_db` is set, and searched across all databases otherwise.
pub fn schema_lookup(table_name: &str, in_current_db: bool) -> SchemaLookup<'_> {
    match table_name.split_once('.') {
        Some((database, table)) => SchemaLookup {
            sql: SCHEMA_QUERY_IN_DB,
            params: vec![(TABLE_SCHEMA_PARAM, database), (TABLE_NAME_PARAM, table)],
        },
        None if in_current_db => SchemaLookup {
            sql: SCHEMA_QUERY_CURRENT_DB,
            params: vec![(TABLE_NAME_PARAM, table_name)],
        },
        None => SchemaLookup {
            sql: SCHEMA_QUERY,
            params: vec![(TABLE_NAME_PARAM, table_name)],
        },
    }
}

/// One column of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub column_name: String,
    pub data_type: String,
    pub is_nullable: bool,
    pub column_default: Option<String>,
}

impl ColumnInfo {
    pub fn new(column_name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            data_type: data_type.into(),
            is_nullable: false,
            column_default: None,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.column_default = Some(default.into());
        self
    }

    fn from_row(row: &[Value]) -> Result<Self> {
        let [name, data_type, nullable, default] = row else {
            return Err(WarehouseError::InvalidResponse(format!(
                "expected 4 schema columns, got {}",
                row.len()
            )));
        };

        Ok(Self {
            column_name: as_string(name)
                .ok_or_else(|| WarehouseError::InvalidResponse("column_name is not a string".into()))?,
            data_type: as_string(data_type)
                .ok_or_else(|| WarehouseError::InvalidResponse("data_type is not a string".into()))?,
            is_nullable: as_flag(nullable),
            column_default: as_string(default).filter(|d| !d.is_empty()),
        })
    }
}

impl std::fmt::Display for ColumnInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.column_name, self.data_type)?;
        if self.is_nullable {
            write!(f, " NULL")?;
        } else {
            write!(f, " NOT NULL")?;
        }
        if let Some(default) = &self.column_default {
            write!(f, " DEFAULT {}", default)?;
        }
        Ok(())
    }
}

/// Decode the rows of a schema lookup.
pub fn columns_from_result(result: &QueryResult) -> Result<Vec<ColumnInfo>> {
    result.rows.iter().map(|row| ColumnInfo::from_row(row)).collect()
}

fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

// information_schema reports nullability as UInt8 or as 'YES'/'NO'
// depending on server version.
fn as_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_u64().is_some_and(|n| n != 0),
        Value::String(s) => matches!(s.to_ascii_uppercase().as_str(), "1" | "YES" | "TRUE"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_columns_from_result() {
        let result = QueryResult {
            columns: vec![],
            rows: vec![
                vec![json!("id"), json!("UInt64"), json!(0), json!("")],
                vec![json!("note"), json!("Nullable(String)"), json!("YES"), json!(null)],
                vec![json!("status"), json!("String"), json!("0"), json!("'new'")],
            ],
            statistics: None,
        };

        let columns = columns_from_result(&result).unwrap();
        assert_eq!(columns[0], ColumnInfo::new("id", "UInt64"));
        assert_eq!(columns[1], ColumnInfo::new("note", "Nullable(String)").nullable());
        assert_eq!(columns[2], ColumnInfo::new("status", "String").with_default("'new'"));
    }

    #[test]
    fn test_short_row_is_error() {
        let result = QueryResult {
            columns: vec![],
            rows: vec![vec![json!("id"), json!("UInt64")]],
            statistics: None,
        };
        assert!(columns_from_result(&result).is_err());
    }

    #[test]
    fn test_display() {
        let col = ColumnInfo::new("total_amount", "Decimal(10, 2)").with_default("0");
        assert_eq!(col.to_string(), "total_amount Decimal(10, 2) NOT NULL DEFAULT 0");
        assert_eq!(
            ColumnInfo::new("note", "Nullable(String)").nullable().to_string(),
            "note Nullable(String) NULL"
        );
    }

    #[test]
    fn test_schema_query_binds_table_name() {
        for sql in [SCHEMA_QUERY, SCHEMA_QUERY_CURRENT_DB, SCHEMA_QUERY_IN_DB] {
            assert!(sql.contains(&format!("{{{}:String}}", TABLE_NAME_PARAM)));
        }
        assert!(SCHEMA_QUERY_IN_DB.contains(&format!("{{{}:String}}", TABLE_SCHEMA_PARAM)));
    }

    #[test]
    fn test_schema_lookup_qualified_name() {
        let lookup = schema_lookup("shop.orders", false);
        assert_eq!(lookup.sql, SCHEMA_QUERY_IN_DB);
        assert_eq!(
            lookup.params,
            vec![(TABLE_SCHEMA_PARAM, "shop"), (TABLE_NAME_PARAM, "orders")]
        );

        // The explicit database wins over the session database.
        assert_eq!(schema_lookup("shop.orders", true).sql, SCHEMA_QUERY_IN_DB);
    }

    #[test]
    fn test_schema_lookup_plain_name() {
        let scoped = schema_lookup("orders", true);
        assert_eq!(scoped.sql, SCHEMA_QUERY_CURRENT_DB);
        assert_eq!(scoped.params, vec![(TABLE_NAME_PARAM, "orders")]);

        let anywhere = schema_lookup("orders", false);
        assert_eq!(anywhere.sql, SCHEMA_QUERY);
        assert_eq!(anywhere.params, vec![(TABLE_NAME_PARAM, "orders")]);
    }
}
