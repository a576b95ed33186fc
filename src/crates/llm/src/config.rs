//! Configuration for remote LLM providers.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default OpenAI-compatible API base URL.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Configuration for remote LLM providers (OpenAI and compatible APIs).
#[derive(Clone, Serialize, Deserialize)]
pub struct RemoteLlmConfig {
    /// API key for authentication.
    pub api_key: String,

    /// Base URL for the API, without a trailing slash.
    ///
    /// Examples:
    /// - OpenAI: "https://api.openai.com/v1"
    /// - Local proxy: "http://127.0.0.1:4000/v1"
    pub base_url: String,

    /// Model name/identifier.
    pub model: String,

    /// Request timeout duration.
    #[serde(default = "default_timeout")]
    pub timeout: Duration,

    /// Organization ID (optional, for providers that support it).
    pub organization: Option<String>,
}

impl RemoteLlmConfig {
    /// Create a new remote LLM configuration.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            timeout: default_timeout(),
            organization: None,
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the organization ID.
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// Same credentials and endpoint, different model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl std::fmt::Debug for RemoteLlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteLlmConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("organization", &self.organization)
            .finish()
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(120)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_config_builder() {
        let config = RemoteLlmConfig::new("test-key", "https://api.openai.com/v1/", "gpt-5")
            .with_timeout(Duration::from_secs(30))
            .with_organization("org-123");

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.model, "gpt-5");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.organization, Some("org-123".to_string()));
    }

    #[test]
    fn test_with_model_keeps_credentials() {
        let base = RemoteLlmConfig::new("k", OPENAI_BASE_URL, "gpt-5");
        let judge = base.clone().with_model("gpt-4o-mini");

        assert_eq!(judge.model, "gpt-4o-mini");
        assert_eq!(judge.api_key, base.api_key);
        assert_eq!(judge.base_url, base.base_url);
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = RemoteLlmConfig::new("sk-secret", OPENAI_BASE_URL, "gpt-5");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
