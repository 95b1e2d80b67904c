//! Configuration management for the lead qualification service
//!
//! Supports loading configuration from:
//! - TOML files
//! - Environment variables (QUALIFY_ prefix)
//! - Built-in defaults

pub mod engine;
pub mod llm;
pub mod settings;

pub use engine::EngineConfig;
pub use llm::LlmConfig;
pub use settings::{load_settings, NotifyConfig, ServerConfig, Settings};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
