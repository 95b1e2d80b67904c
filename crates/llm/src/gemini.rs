//! Gemini REST backend

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use qualify_config::LlmConfig;
use qualify_core::{
    ChatMessage, FinishReason, GenerateRequest, GenerateResponse, LanguageModel, Role,
};

use crate::LlmError;

/// Google Gemini backend
#[derive(Clone)]
pub struct GeminiBackend {
    client: Client,
    config: LlmConfig,
}

impl GeminiBackend {
    /// Create a new Gemini backend
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| LlmError::Configuration(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn api_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint, self.config.model
        )
    }

    /// Execute a single request (used by the retry loop)
    async fn execute_request(
        &self,
        request: &GeminiRequest,
    ) -> Result<GeminiResponse, LlmError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| LlmError::Configuration("no API key configured".into()))?;

        let response = self
            .client
            .post(self.api_url())
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            // 5xx is retryable, 4xx is not
            if status.is_server_error() {
                return Err(LlmError::Network(format!("server error {}: {}", status, body)));
            }
            return Err(LlmError::Api(format!("{}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))
    }

    fn is_retryable(error: &LlmError) -> bool {
        matches!(error, LlmError::Network(_) | LlmError::Timeout)
    }

    fn build_request(&self, request: &GenerateRequest) -> GeminiRequest {
        let mut system_parts = Vec::new();
        let mut contents = Vec::new();

        for message in &request.messages {
            match message.role {
                Role::System => system_parts.push(GeminiPart {
                    text: message.content.clone(),
                }),
                _ => contents.push(GeminiContent::from(message)),
            }
        }

        GeminiRequest {
            contents,
            system_instruction: (!system_parts.is_empty())
                .then_some(GeminiSystemInstruction { parts: system_parts }),
            generation_config: GeminiGenerationConfig {
                temperature: request.temperature.or(Some(self.config.temperature)),
                max_output_tokens: request.max_tokens.or(Some(self.config.max_tokens)),
                response_mime_type: request
                    .json_response
                    .then(|| "application/json".to_string()),
            },
        }
    }

    fn into_response(response: GeminiResponse) -> Result<GenerateResponse, LlmError> {
        if let Some(feedback) = &response.prompt_feedback {
            if let Some(reason) = &feedback.block_reason {
                return Err(LlmError::Blocked(reason.clone()));
            }
        }

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("no candidates in response".into()))?;

        if matches!(candidate.finish_reason.as_deref(), Some("SAFETY" | "PROHIBITED_CONTENT")) {
            return Err(LlmError::Blocked(
                candidate.finish_reason.unwrap_or_default(),
            ));
        }

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().map(|p| p.text).collect::<Vec<_>>().join(""))
            .unwrap_or_default();

        if text.is_empty() {
            return Err(LlmError::InvalidResponse("empty candidate text".into()));
        }

        let finish_reason = match candidate.finish_reason.as_deref() {
            Some("MAX_TOKENS") => FinishReason::Length,
            _ => FinishReason::Stop,
        };

        Ok(GenerateResponse { text, finish_reason })
    }
}

#[async_trait]
impl LanguageModel for GeminiBackend {
    /// Generate a completion, retrying transient faults when configured
    ///
    /// With `max_retries = 0` (the default) a single failure surfaces
    /// immediately and the engine's fallback takes over.
    async fn generate(
        &self,
        request: GenerateRequest,
    ) -> qualify_core::Result<GenerateResponse> {
        let wire_request = self.build_request(&request);

        let mut last_error = None;
        let mut backoff = self.config.initial_backoff();

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                tracing::warn!(
                    "LLM request failed, retrying in {:?} (attempt {}/{})",
                    backoff,
                    attempt,
                    self.config.max_retries
                );
                tokio::time::sleep(backoff).await;
                backoff *= 2;
            }

            match self.execute_request(&wire_request).await {
                Ok(response) => return Ok(Self::into_response(response)?),
                Err(e) if Self::is_retryable(&e) => {
                    last_error = Some(e);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Network("max retries exceeded".to_string()))
            .into())
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

// Gemini API types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiSystemInstruction>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiSystemInstruction {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

impl From<&ChatMessage> for GeminiContent {
    fn from(msg: &ChatMessage) -> Self {
        // Gemini only knows "user" and "model" turn roles
        let role = match msg.role {
            Role::Assistant => "model",
            _ => "user",
        };
        Self {
            role: role.to_string(),
            parts: vec![GeminiPart {
                text: msg.content.clone(),
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiCandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}
