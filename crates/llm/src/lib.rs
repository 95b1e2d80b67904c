//! LLM integration
//!
//! Features:
//! - Gemini REST backend behind the `LanguageModel` trait
//! - JSON response-format constraint for structured output
//! - Request timeout and optional bounded retry
//! - Lenient JSON parsing for decorated model output

pub mod gemini;
pub mod json;

pub use gemini::GeminiBackend;
pub use json::parse_json;

use thiserror::Error;

/// LLM errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Response blocked by provider: {0}")]
    Blocked(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

impl From<LlmError> for qualify_core::Error {
    fn from(err: LlmError) -> Self {
        qualify_core::Error::Llm(err.to_string())
    }
}
