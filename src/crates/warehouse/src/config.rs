//! Connection settings and host normalization.
//!
//! Hosts are accepted in whatever shape they were copied from a console:
//! quoted, with a scheme, with a trailing slash. TLS is inferred from the
//! host and port rather than configured separately.

use crate::error::{Result, WarehouseError};
use std::time::Duration;
use utils::config::{get_env_or, get_env_parse_or, get_env_trimmed, trim_quotes, FromEnv};

/// Domain suffix of ClickHouse Cloud services, which only accept TLS.
pub const CLOUD_DOMAIN: &str = ".clickhouse.cloud";

/// HTTPS port of the ClickHouse HTTP interface.
pub const SECURE_HTTP_PORT: u16 = 8443;

/// Plain HTTP port of the ClickHouse HTTP interface.
pub const HTTP_PORT: u16 = 8123;

/// Environment prefix read by [`ConnectionConfig::from_env`].
pub const ENV_PREFIX: &str = "CLICKHOUSE_";

/// How to reach a ClickHouse server over its HTTP interface.
#[derive(Clone)]
pub struct ConnectionConfig {
    /// Bare host name, no scheme or path.
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Default database for unqualified table names.
    pub database: Option<String>,
    /// Use HTTPS.
    pub secure: bool,
    pub timeout: Duration,
}

impl ConnectionConfig {
    /// Build a configuration, normalizing the host and inferring TLS.
    pub fn new(
        host: impl AsRef<str>,
        port: u16,
        username: impl AsRef<str>,
        password: impl AsRef<str>,
    ) -> Self {
        let host = normalize_host(host.as_ref());
        let secure = infer_secure(&host, port);

        Self {
            host,
            port,
            username: trim_quotes(username.as_ref()).to_string(),
            password: trim_quotes(password.as_ref()).to_string(),
            database: None,
            secure,
            timeout: default_timeout(),
        }
    }

    /// Load from `CLICKHOUSE_HOST`, `CLICKHOUSE_PORT`, `CLICKHOUSE_USER`,
    /// `CLICKHOUSE_PASSWORD` and `CLICKHOUSE_DATABASE`.
    pub fn from_env() -> Result<Self> {
        <Self as FromEnv>::from_env(ENV_PREFIX).map_err(WarehouseError::from)
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Root URL of the HTTP interface, e.g. `https://abc.clickhouse.cloud:8443/`.
    pub fn base_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{}://{}:{}/", scheme, self.host, self.port)
    }
}

impl FromEnv for ConnectionConfig {
    fn from_env(prefix: &str) -> utils::Result<Self> {
        let host_key = format!("{}HOST", prefix);
        let host = get_env_trimmed(&host_key).ok_or_else(|| {
            utils::UtilsError::ConfigError(format!("Environment variable '{}' is not set", host_key))
        })?;

        let port = get_env_parse_or(&format!("{}PORT", prefix), default_port(&normalize_host(&host)))?;

        let username = get_env_or(&format!("{}USER", prefix), "default");
        let password = get_env_trimmed(&format!("{}PASSWORD", prefix)).unwrap_or_default();

        let mut config = Self::new(host, port, username, password);
        if let Some(database) = get_env_trimmed(&format!("{}DATABASE", prefix)) {
            config = config.with_database(database);
        }
        Ok(config)
    }
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("secure", &self.secure)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Strip quotes, an `https://` or `http://` scheme, and a trailing slash.
pub fn normalize_host(raw: &str) -> String {
    let host = trim_quotes(raw);
    let host = host
        .strip_prefix("https://")
        .or_else(|| host.strip_prefix("http://"))
        .unwrap_or(host);
    host.trim_end_matches('/').to_string()
}

/// TLS is required for ClickHouse Cloud hosts and for the HTTPS port.
pub fn infer_secure(host: &str, port: u16) -> bool {
    host.contains(CLOUD_DOMAIN) || port == SECURE_HTTP_PORT
}

fn default_port(host: &str) -> u16 {
    if host.contains(CLOUD_DOMAIN) {
        SECURE_HTTP_PORT
    } else {
        HTTP_PORT
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cloud_host_with_scheme_is_secure_on_any_port() {
        for port in [8443, 8123, 443, 9000] {
            let config = ConnectionConfig::new("https://foo.clickhouse.cloud", port, "default", "");
            assert_eq!(config.host, "foo.clickhouse.cloud");
            assert!(config.secure, "port {} should be secure", port);
        }
    }

    #[test]
    fn test_plain_host_on_8443_is_secure() {
        let config = ConnectionConfig::new("db.internal", 8443, "default", "");
        assert!(config.secure);
        assert_eq!(config.base_url(), "https://db.internal:8443/");
    }

    #[test]
    fn test_plain_host_is_not_secure() {
        let config = ConnectionConfig::new("localhost", 8123, "default", "");
        assert!(!config.secure);
        assert_eq!(config.base_url(), "http://localhost:8123/");

        let config = ConnectionConfig::new("http://localhost", 9000, "default", "");
        assert_eq!(config.host, "localhost");
        assert!(!config.secure);
    }

    #[test]
    fn test_normalize_host() {
        assert_eq!(normalize_host("\"https://abc.clickhouse.cloud/\""), "abc.clickhouse.cloud");
        assert_eq!(normalize_host("'http://localhost'"), "localhost");
        assert_eq!(normalize_host("localhost"), "localhost");
    }

    #[test]
    fn test_credentials_are_unquoted() {
        let config = ConnectionConfig::new("localhost", 8123, "'reader'", "\"p@ss\"");
        assert_eq!(config.username, "reader");
        assert_eq!(config.password, "p@ss");
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = ConnectionConfig::new("localhost", 8123, "default", "hunter2");
        assert!(!format!("{:?}", config).contains("hunter2"));
    }

    #[test]
    fn test_from_env() {
        std::env::set_var("WH_TEST_A_HOST", "\"https://abc.clickhouse.cloud\"");
        std::env::set_var("WH_TEST_A_USER", "'reader'");
        std::env::set_var("WH_TEST_A_PASSWORD", "secret");
        std::env::set_var("WH_TEST_A_DATABASE", "shop");

        let config = <ConnectionConfig as FromEnv>::from_env("WH_TEST_A_").unwrap();
        assert_eq!(config.host, "abc.clickhouse.cloud");
        assert_eq!(config.port, 8443);
        assert!(config.secure);
        assert_eq!(config.username, "reader");
        assert_eq!(config.password, "secret");
        assert_eq!(config.database.as_deref(), Some("shop"));

        for key in ["HOST", "USER", "PASSWORD", "DATABASE"] {
            std::env::remove_var(format!("WH_TEST_A_{}", key));
        }
    }

    #[test]
    fn test_from_env_local_defaults() {
        std::env::set_var("WH_TEST_B_HOST", "localhost");

        let config = <ConnectionConfig as FromEnv>::from_env("WH_TEST_B_").unwrap();
        assert_eq!(config.port, 8123);
        assert!(!config.secure);
        assert_eq!(config.username, "default");
        assert_eq!(config.password, "");
        assert_eq!(config.database, None);

        std::env::remove_var("WH_TEST_B_HOST");
    }

    #[test]
    fn test_from_env_errors() {
        assert!(<ConnectionConfig as FromEnv>::from_env("WH_TEST_MISSING_").is_err());

        std::env::set_var("WH_TEST_C_HOST", "localhost");
        std::env::set_var("WH_TEST_C_PORT", "eighty");
        assert!(<ConnectionConfig as FromEnv>::from_env("WH_TEST_C_").is_err());
        std::env::remove_var("WH_TEST_C_HOST");
        std::env::remove_var("WH_TEST_C_PORT");
    }
}
