//! Request validation utilities

use regex::Regex;
use std::sync::LazyLock;

use crate::api::error::{ApiError, ApiResult};

/// A table name, optionally qualified with its database.
static TABLE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$")
        .expect("table name regex is valid")
});

/// Validate that a required string field has non-whitespace content
pub fn validate_not_blank(value: &str, field_name: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::ValidationError(format!(
            "{} cannot be empty",
            field_name
        )));
    }
    Ok(())
}

/// Validate that a table name is a plain identifier or `database.table`
pub fn validate_table_name(value: &str) -> ApiResult<()> {
    validate_not_blank(value, "table_name")?;
    if !TABLE_NAME_RE.is_match(value) {
        return Err(ApiError::ValidationError(format!(
            "table_name '{}' is not a valid identifier",
            value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("SELECT 1", "sql").is_ok());
        assert!(validate_not_blank("", "sql").is_err());
        assert!(validate_not_blank(" \n\t", "sql").is_err());
    }

    #[test]
    fn test_validate_table_name_valid() {
        for name in ["orders", "_tmp", "Orders2024", "shop.orders"] {
            assert!(validate_table_name(name).is_ok(), "{}", name);
        }
    }

    #[test]
    fn test_validate_table_name_invalid() {
        for name in [
            "",
            "2024_orders",
            "orders; DROP TABLE x",
            "orders'",
            "a.b.c",
            "shop.",
            " orders",
        ] {
            assert!(validate_table_name(name).is_err(), "{:?}", name);
        }
    }
}
