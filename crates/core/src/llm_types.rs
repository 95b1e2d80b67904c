//! LLM request/response types
//!
//! Common types for the language model seam. The qualification engine only
//! needs single-shot completions, optionally constrained to JSON output.

use serde::{Deserialize, Serialize};

use crate::message::ChatMessage;

/// LLM generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Messages for chat completion
    pub messages: Vec<ChatMessage>,
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Temperature (0.0 - 2.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Ask the provider to constrain output to valid JSON
    #[serde(default)]
    pub json_response: bool,
}

impl Default for GenerateRequest {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            max_tokens: None,
            temperature: Some(0.7),
            json_response: false,
        }
    }
}

impl GenerateRequest {
    /// Create a request from a single user prompt
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::user(prompt)],
            ..Default::default()
        }
    }

    /// Request a JSON-constrained completion
    pub fn with_json_response(mut self) -> Self {
        self.json_response = true;
        self
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature.clamp(0.0, 2.0));
        self
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Finish reason
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Normal completion
    #[default]
    Stop,
    /// Hit max tokens limit
    Length,
    /// Content was filtered by the provider
    ContentFilter,
    /// Error occurred
    Error,
}

/// LLM generation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Generated text
    pub text: String,
    pub finish_reason: FinishReason,
}

impl GenerateResponse {
    /// Create a simple text response
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            text: content.into(),
            finish_reason: FinishReason::Stop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let req = GenerateRequest::from_prompt("Hello")
            .with_json_response()
            .with_temperature(0.4)
            .with_max_tokens(512);

        assert_eq!(req.messages.len(), 1);
        assert!(req.json_response);
        assert_eq!(req.temperature, Some(0.4));
        assert_eq!(req.max_tokens, Some(512));
    }

    #[test]
    fn test_temperature_clamped() {
        let req = GenerateRequest::default().with_temperature(5.0);
        assert_eq!(req.temperature, Some(2.0));
    }
}
