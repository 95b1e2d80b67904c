//! Conversation-driven lead qualification
//!
//! Two cooperating components:
//! - [`QuestionGenerator`] - produces seed qualifying questions from a rubric
//! - [`QualificationEngine`] - drives the multi-turn dialogue: one follow-up
//!   question per turn, a termination decision, and on completion a fitness
//!   score, tri-state status, and summary
//!
//! Both recover locally from every model fault: a technical failure degrades
//! the conversation, it never crashes it and never completes it.
//!
//! [`IntakeCoordinator`] holds the caller-side state machine: greeting seed,
//! open/complete transition, lead persistence, HOT notification gating.

pub mod engine;
pub mod generator;
pub mod intake;
pub mod prompt;
pub mod verdict;

pub use engine::QualificationEngine;
pub use generator::QuestionGenerator;
pub use intake::{IntakeCoordinator, IntakeSession, IntakeTurn, SessionState};
pub use prompt::{build_analysis_prompt, build_generator_prompt};
pub use verdict::{validate_verdict, RawVerdict};

use thiserror::Error;

/// Engine errors
///
/// Model faults never surface through `analyze` or `generate`; this type
/// covers the intake layer, where persistence failures do propagate.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Session error: {0}")]
    Session(String),

    #[error("Conversation already complete")]
    AlreadyComplete,

    #[error("Store error: {0}")]
    Store(String),
}

impl From<qualify_core::Error> for EngineError {
    fn from(err: qualify_core::Error) -> Self {
        EngineError::Store(err.to_string())
    }
}
