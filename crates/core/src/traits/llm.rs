//! Language model trait

use async_trait::async_trait;

use crate::{GenerateRequest, GenerateResponse, Result};

/// Language model interface
///
/// Implementations:
/// - `GeminiBackend` - Google Gemini REST API (qualify-llm)
///
/// # Example
///
/// ```ignore
/// let llm: Arc<dyn LanguageModel> = Arc::new(GeminiBackend::new(config)?);
/// let request = GenerateRequest::from_prompt("Say hello").with_json_response();
/// let response = llm.generate(request).await?;
/// println!("{}", response.text);
/// ```
#[async_trait]
pub trait LanguageModel: Send + Sync + 'static {
    /// Generate a completion
    ///
    /// Transport faults, timeouts, and provider-side content blocks all
    /// surface as errors; callers in the engine recover locally and must
    /// never propagate these to the prospect.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;

    /// Get model name for logging
    fn model_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GenerateResponse;

    struct MockLlm;

    #[async_trait]
    impl LanguageModel for MockLlm {
        async fn generate(&self, _request: GenerateRequest) -> Result<GenerateResponse> {
            Ok(GenerateResponse::text("Mock response"))
        }

        fn model_name(&self) -> &str {
            "mock-llm"
        }
    }

    #[tokio::test]
    async fn test_mock_llm() {
        let llm = MockLlm;
        assert_eq!(llm.model_name(), "mock-llm");

        let response = llm.generate(GenerateRequest::from_prompt("Hello")).await.unwrap();
        assert_eq!(response.text, "Mock response");
    }
}
