//! HTTP server bind configuration.
//!
//! # Example
//!
//! ```rust,ignore
//! use utils::server::ServerConfig;
//!
//! let config = ServerConfig::new("0.0.0.0", 8000)
//!     .with_timeout(Duration::from_secs(300));
//!
//! let addr = config.socket_addr()?;
//! ```

use crate::config::{get_env_or, get_env_parse_or, FromEnv};
use crate::error::{Result, UtilsError};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Configuration for HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,

    /// Port to bind to.
    pub port: u16,

    /// Request timeout duration.
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
}

impl ServerConfig {
    /// Create a new server configuration.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            timeout: default_timeout(),
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| UtilsError::ServerError(format!("Invalid socket address: {}", e)))
    }
}

impl FromEnv for ServerConfig {
    /// Reads `{prefix}HOST`, `{prefix}PORT` and `{prefix}TIMEOUT_SECS`.
    fn from_env(prefix: &str) -> Result<Self> {
        let host = get_env_or(&format!("{}HOST", prefix), DEFAULT_HOST);

        let port = get_env_parse_or(&format!("{}PORT", prefix), DEFAULT_PORT)?;
        let timeout = Duration::from_secs(get_env_parse_or(
            &format!("{}TIMEOUT_SECS", prefix),
            DEFAULT_TIMEOUT_SECS,
        )?);

        Ok(Self::new(host, port).with_timeout(timeout))
    }
}

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_TIMEOUT_SECS: u64 = 300;

fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}
