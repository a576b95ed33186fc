//! Service configuration loaded from the process environment.

use crate::error::{Result, SqlGenError};
use crate::judge::DEFAULT_JUDGE_TEMPERATURE;
use llm::config::OPENAI_BASE_URL;
use llm::RemoteLlmConfig;
use std::time::Duration;
use utils::config::{get_env_or, get_env_parse_or, get_env_trimmed};
use warehouse::ConnectionConfig;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const DEFAULT_SQLGEN_MODEL: &str = "gpt-5";
pub const DEFAULT_JUDGE_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;

/// Everything the service needs besides its bind address.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Provider settings for SQL generation.
    pub generation: RemoteLlmConfig,
    /// Provider settings for judging. Same key and endpoint, different model.
    pub judge: RemoteLlmConfig,
    pub judge_temperature: f32,
    pub warehouse: ConnectionConfig,
}

impl AppConfig {
    /// Read `OPENAI_*`, `SQLGEN_MODEL`, `JUDGE_*`, `LLM_TIMEOUT_SECS` and
    /// `CLICKHOUSE_*`. Fails on a missing API key or warehouse host, or on a
    /// value that does not parse.
    pub fn from_env() -> Result<Self> {
        let api_key = get_env_trimmed(API_KEY_VAR).ok_or_else(|| {
            SqlGenError::Config(format!("Environment variable '{}' is not set", API_KEY_VAR))
        })?;
        let base_url = get_env_or("OPENAI_BASE_URL", OPENAI_BASE_URL);
        let timeout = Duration::from_secs(get_env_parse_or(
            "LLM_TIMEOUT_SECS",
            DEFAULT_LLM_TIMEOUT_SECS,
        )?);

        let mut generation = RemoteLlmConfig::new(
            api_key,
            base_url,
            get_env_or("SQLGEN_MODEL", DEFAULT_SQLGEN_MODEL),
        )
        .with_timeout(timeout);
        if let Some(organization) = get_env_trimmed("OPENAI_ORGANIZATION") {
            generation = generation.with_organization(organization);
        }
        let judge = generation
            .clone()
            .with_model(get_env_or("JUDGE_MODEL", DEFAULT_JUDGE_MODEL));

        Ok(Self {
            generation,
            judge,
            judge_temperature: get_env_parse_or("JUDGE_TEMPERATURE", DEFAULT_JUDGE_TEMPERATURE)?,
            warehouse: ConnectionConfig::from_env()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    const VARS: [&str; 12] = [
        "OPENAI_API_KEY",
        "OPENAI_BASE_URL",
        "OPENAI_ORGANIZATION",
        "SQLGEN_MODEL",
        "JUDGE_MODEL",
        "JUDGE_TEMPERATURE",
        "LLM_TIMEOUT_SECS",
        "CLICKHOUSE_HOST",
        "CLICKHOUSE_PORT",
        "CLICKHOUSE_USER",
        "CLICKHOUSE_PASSWORD",
        "CLICKHOUSE_DATABASE",
    ];

    fn clear() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    // One test so the steps never race on the shared process environment.
    #[test]
    fn test_from_env() {
        clear();
        let err = AppConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));

        env::set_var("OPENAI_API_KEY", "\"sk-test\"");
        env::set_var("CLICKHOUSE_HOST", "'https://abc.eu-west-1.aws.clickhouse.cloud/'");
        env::set_var("CLICKHOUSE_PASSWORD", "secret");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.generation.api_key, "sk-test");
        assert_eq!(config.generation.base_url, OPENAI_BASE_URL);
        assert_eq!(config.generation.model, DEFAULT_SQLGEN_MODEL);
        assert_eq!(config.generation.timeout, Duration::from_secs(120));
        assert_eq!(config.judge.model, DEFAULT_JUDGE_MODEL);
        assert_eq!(config.judge.api_key, "sk-test");
        assert_eq!(config.judge_temperature, 0.1);
        assert_eq!(config.warehouse.host, "abc.eu-west-1.aws.clickhouse.cloud");
        assert_eq!(config.warehouse.port, 8443);
        assert!(config.warehouse.secure);
        assert_eq!(config.warehouse.username, "default");
        assert_eq!(config.generation.organization, None);

        env::set_var("OPENAI_BASE_URL", "http://127.0.0.1:4000/v1/");
        env::set_var("SQLGEN_MODEL", "gpt-5-mini");
        env::set_var("JUDGE_MODEL", "gpt-4o");
        env::set_var("JUDGE_TEMPERATURE", "0");
        env::set_var("LLM_TIMEOUT_SECS", "30");
        env::set_var("OPENAI_ORGANIZATION", "org-42");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.generation.base_url, "http://127.0.0.1:4000/v1");
        assert_eq!(config.generation.model, "gpt-5-mini");
        assert_eq!(config.judge.model, "gpt-4o");
        assert_eq!(config.judge_temperature, 0.0);
        assert_eq!(config.judge.timeout, Duration::from_secs(30));
        assert_eq!(config.judge.organization.as_deref(), Some("org-42"));

        env::set_var("LLM_TIMEOUT_SECS", "soon");
        assert!(matches!(AppConfig::from_env(), Err(SqlGenError::Config(_))));

        env::set_var("LLM_TIMEOUT_SECS", "30");
        env::set_var("CLICKHOUSE_PORT", "http");
        assert!(AppConfig::from_env().is_err());

        clear();
    }
}
