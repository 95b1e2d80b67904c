//! Qualification engine configuration

use serde::{Deserialize, Serialize};

/// Conversation engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Hard cap on prospect turns before the intake layer forces a
    /// conservative WARM completion. Zero disables the cap.
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,

    /// Clarifying question returned when the model call or its output is
    /// unusable
    #[serde(default = "default_fallback_question")]
    pub fallback_question: String,

    /// Questions returned by the generator when its model call fails
    #[serde(default = "default_fallback_questions")]
    pub fallback_questions: Vec<String>,

    /// Greeting seeded into every new conversation, `{name}` is replaced
    /// with the qualifier name
    #[serde(default = "default_greeting_template")]
    pub greeting_template: String,
}

fn default_max_turns() -> u32 {
    20
}

fn default_fallback_question() -> String {
    "I see. Could you elaborate on that a bit more?".to_string()
}

fn default_fallback_questions() -> Vec<String> {
    vec![
        "Could you tell me a bit more about your current situation?".to_string(),
        "What are your primary goals for this project?".to_string(),
        "What is your estimated budget for this initiative?".to_string(),
    ]
}

fn default_greeting_template() -> String {
    "Hi! I'm the digital assistant for {name}. I'd love to learn a bit about \
     your goals to see if we're a match. Ready to dive in?"
        .to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_turns: default_max_turns(),
            fallback_question: default_fallback_question(),
            fallback_questions: default_fallback_questions(),
            greeting_template: default_greeting_template(),
        }
    }
}

impl EngineConfig {
    /// Render the seeded greeting for a qualifier
    pub fn greeting(&self, qualifier_name: &str) -> String {
        self.greeting_template.replace("{name}", qualifier_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_turns, 20);
        assert_eq!(config.fallback_questions.len(), 3);
        assert!(!config.fallback_question.is_empty());
    }

    #[test]
    fn test_greeting_substitution() {
        let config = EngineConfig::default();
        let greeting = config.greeting("Acme Intake");
        assert!(greeting.contains("Acme Intake"));
        assert!(!greeting.contains("{name}"));
    }
}
