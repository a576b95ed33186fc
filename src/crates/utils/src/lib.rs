//! Environment configuration and server helpers for sqlgen.
//!
//! # Modules
//!
//! ## Config (`config`)
//!
//! Environment variable loading with type parsing and quote trimming:
//!
//! ```rust,ignore
//! use utils::config::{get_env, get_env_parse_or, get_env_trimmed};
//!
//! let api_key = get_env("OPENAI_API_KEY")?;
//! let timeout = get_env_parse_or::<u64>("LLM_TIMEOUT_SECS", 120)?;
//! let host = get_env_trimmed("CLICKHOUSE_HOST");
//! ```
//!
//! ## Server (`server`)
//!
//! Bind configuration for the HTTP server:
//!
//! ```rust,ignore
//! use utils::server::ServerConfig;
//!
//! let config = ServerConfig::from_env("SQLGEN_")?;
//! let addr = config.socket_addr()?;
//! ```
//!
//! # Features
//!
//! - `server` - Server utilities (enabled by default)
//! - `config` - Configuration utilities (enabled by default)

pub mod error;

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "config")]
pub mod config;

// Re-export commonly used types
pub use error::{Result, UtilsError};

#[cfg(feature = "server")]
pub use server::ServerConfig;

#[cfg(feature = "config")]
pub use config::{
    get_env, get_env_or, get_env_parse, get_env_parse_or, get_env_trimmed, trim_quotes, FromEnv,
};
