//! Qualification conversation engine

use std::sync::Arc;

use qualify_config::EngineConfig;
use qualify_core::{
    ChatMessage, GenerateRequest, LanguageModel, QualificationCriteria, QualificationVerdict,
};
use qualify_llm::parse_json;

use crate::verdict::{validate_verdict, RawVerdict};

/// The conversation-driven qualification engine
///
/// A pure function of (history, latest input, criteria) plus one outbound
/// model call. Holds no per-conversation state; distinct conversations may
/// run concurrently through one shared instance.
pub struct QualificationEngine {
    llm: Arc<dyn LanguageModel>,
    config: EngineConfig,
}

impl QualificationEngine {
    pub fn new(llm: Arc<dyn LanguageModel>, config: EngineConfig) -> Self {
        Self { llm, config }
    }

    /// Analyze one turn of conversation
    ///
    /// Returns either a follow-up question (conversation continues) or a
    /// terminal verdict. Never errors: transport faults, blocked responses,
    /// and malformed output all collapse to an incomplete verdict carrying
    /// the configured clarifying question, so a technical failure can never
    /// be mistaken for a qualification decision.
    pub async fn analyze(
        &self,
        history: &[ChatMessage],
        latest_input: &str,
        criteria: &QualificationCriteria,
    ) -> QualificationVerdict {
        let prompt = crate::prompt::build_analysis_prompt(history, latest_input, criteria);
        let request = GenerateRequest::from_prompt(prompt).with_json_response();

        let text = match self.llm.generate(request).await {
            Ok(response) => response.text,
            Err(e) => {
                tracing::warn!(error = %e, "model call failed, returning fallback verdict");
                return self.fallback_verdict();
            }
        };

        tracing::debug!(raw = %text, "model verdict text");

        let raw: RawVerdict = match parse_json(&text) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "unparseable verdict, returning fallback verdict");
                return self.fallback_verdict();
            }
        };

        match validate_verdict(raw) {
            Some(verdict) => verdict,
            None => {
                tracing::warn!("verdict failed validation, returning fallback verdict");
                self.fallback_verdict()
            }
        }
    }

    /// The verdict substituted on any fault: keep the conversation open
    /// with a generic clarifying question
    pub fn fallback_verdict(&self) -> QualificationVerdict {
        QualificationVerdict::continuation(self.config.fallback_question.clone())
    }
}
