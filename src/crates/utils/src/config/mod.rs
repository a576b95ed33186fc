//! Configuration management utilities.
//!
//! This module provides utilities for loading configuration from the process
//! environment:
//! - Environment variable loading with type parsing
//! - Defaults for optional settings
//! - Quote trimming for values exported from `.env`-style files
//!
//! # Example
//!
//! ```rust,ignore
//! use utils::config::{get_env, get_env_parse_or};
//!
//! let api_key = get_env("OPENAI_API_KEY")?;
//! let port = get_env_parse_or::<u16>("SQLGEN_PORT", 8000)?;
//! ```

use crate::error::{Result, UtilsError};

/// Get an environment variable as a string.
pub fn get_env(key: &str) -> Result<String> {
    std::env::var(key).map_err(|e| {
        UtilsError::ConfigError(format!("Environment variable '{}' not found: {}", key, e))
    })
}

/// Get an environment variable and parse it to the specified type.
pub fn get_env_parse<T: std::str::FromStr>(key: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    let value = get_env(key)?;
    trim_quotes(&value).parse::<T>().map_err(|e| {
        UtilsError::ConfigError(format!(
            "Failed to parse environment variable '{}': {}",
            key, e
        ))
    })
}

/// Get an environment variable with a default value.
pub fn get_env_or(key: &str, default: &str) -> String {
    get_env_trimmed(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, or use a default when it is unset or empty.
///
/// A value that is set but does not parse is an error, not the default.
pub fn get_env_parse_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match get_env_trimmed(key) {
        Some(_) => get_env_parse(key),
        None => Ok(default),
    }
}

/// Get an environment variable with surrounding quotes removed.
///
/// Returns `None` when the variable is unset or empty after trimming.
pub fn get_env_trimmed(key: &str) -> Option<String> {
    let value = std::env::var(key).ok()?;
    let trimmed = trim_quotes(&value);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Strip surrounding whitespace, then double quotes, then single quotes.
///
/// Values copied out of `.env` files frequently keep their quoting, e.g.
/// `CLICKHOUSE_HOST="abc.clickhouse.cloud"`.
pub fn trim_quotes(value: &str) -> &str {
    value.trim().trim_matches('"').trim_matches('\'')
}

/// Trait for types that can be loaded from environment variables.
pub trait FromEnv: Sized {
    /// Load configuration from environment variables with the given prefix.
    fn from_env(prefix: &str) -> Result<Self>;
}
