//! LLM backend configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Language model backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model name/ID
    #[serde(default = "default_model")]
    pub model: String,

    /// API base endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API key (usually from QUALIFY_LLM__API_KEY)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry attempts for transient faults after the first try
    ///
    /// Zero preserves single-attempt-then-fallback behavior; the engine
    /// degrades to a generic clarifying question either way.
    #[serde(default)]
    pub max_retries: u32,

    /// Initial backoff in milliseconds (doubles each retry)
    #[serde(default = "default_backoff_ms")]
    pub initial_backoff_ms: u64,
}

fn default_model() -> String {
    "gemini-flash-latest".to_string()
}
fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}
fn default_max_tokens() -> u32 {
    1024
}
fn default_temperature() -> f32 {
    0.7
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_backoff_ms() -> u64 {
    200
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            api_key: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            max_retries: 0,
            initial_backoff_ms: default_backoff_ms(),
        }
    }
}

impl LlmConfig {
    /// Request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Initial retry backoff as a Duration
    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LlmConfig::default();
        assert_eq!(config.model, "gemini-flash-latest");
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: LlmConfig = toml::from_str("model = \"gemini-pro\"").unwrap();
        assert_eq!(config.model, "gemini-pro");
        assert_eq!(config.temperature, 0.7);
    }
}
