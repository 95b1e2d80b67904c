//! Top-level settings
//!
//! Layered: built-in defaults, then an optional TOML file, then QUALIFY_
//! environment variables (double underscore separates nesting, e.g.
//! `QUALIFY_LLM__API_KEY`).

use serde::{Deserialize, Serialize};

use crate::{ConfigError, EngineConfig, LlmConfig};

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; empty means same-origin only
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Idle chat sessions are dropped after this many seconds
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_session_idle_secs() -> u64 {
    1800
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            session_idle_secs: default_session_idle_secs(),
        }
    }
}

/// Outbound notification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Disable to swallow alerts (development)
    #[serde(default)]
    pub enabled: bool,

    /// Resend API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// Verified sender address
    #[serde(default = "default_from_address")]
    pub from_address: String,

    /// Base URL used for dashboard links in alert emails
    #[serde(default = "default_app_url")]
    pub app_url: String,
}

fn default_from_address() -> String {
    "QualifyAI <onboarding@resend.dev>".to_string()
}
fn default_app_url() -> String {
    "http://localhost:3000".to_string()
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: None,
            from_address: default_from_address(),
            app_url: default_app_url(),
        }
    }
}

/// Root settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
}

/// Load settings from an optional file plus environment overrides
pub fn load_settings(path: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(config::File::with_name(path).required(true));
    }

    let raw = builder
        .add_source(
            config::Environment::with_prefix("QUALIFY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let settings: Settings = raw.try_deserialize()?;

    if settings.llm.api_key.is_none() {
        tracing::warn!("No LLM API key configured; model calls will fail and fall back");
    }

    Ok(settings)
}
