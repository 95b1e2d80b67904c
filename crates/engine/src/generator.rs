//! Seed question generator

use std::sync::Arc;

use qualify_config::EngineConfig;
use qualify_core::{GenerateRequest, LanguageModel, QualificationCriteria};
use qualify_llm::parse_json;

/// Stateless generator for preview/seed qualifying questions
///
/// `generate` never errors: any model fault or malformed output yields the
/// configured fallback triple instead.
pub struct QuestionGenerator {
    llm: Arc<dyn LanguageModel>,
    config: EngineConfig,
}

impl QuestionGenerator {
    pub fn new(llm: Arc<dyn LanguageModel>, config: EngineConfig) -> Self {
        Self { llm, config }
    }

    /// Produce 3-5 qualifying questions for a rubric
    pub async fn generate(&self, criteria: &QualificationCriteria) -> Vec<String> {
        let prompt = crate::prompt::build_generator_prompt(criteria);
        let request = GenerateRequest::from_prompt(prompt).with_json_response();

        let text = match self.llm.generate(request).await {
            Ok(response) => response.text,
            Err(e) => {
                tracing::warn!(error = %e, "question generation failed, using fallback list");
                return self.fallback();
            }
        };

        match parse_json::<Vec<String>>(&text) {
            Ok(questions) => {
                let questions: Vec<String> = questions
                    .into_iter()
                    .map(|q| q.trim().to_string())
                    .filter(|q| !q.is_empty())
                    .collect();
                if questions.is_empty() {
                    tracing::warn!("model returned no usable questions, using fallback list");
                    self.fallback()
                } else {
                    questions
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "unparseable question list, using fallback list");
                self.fallback()
            }
        }
    }

    fn fallback(&self) -> Vec<String> {
        self.config.fallback_questions.clone()
    }
}
