//! Engine output types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tri-state fitness classification, assigned only at completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LeadStatus {
    Hot,
    Warm,
    Cold,
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeadStatus::Hot => write!(f, "HOT"),
            LeadStatus::Warm => write!(f, "WARM"),
            LeadStatus::Cold => write!(f, "COLD"),
        }
    }
}

/// Terminal classification data, present only on a completed verdict
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerdictOutcome {
    /// Fitness score, 0-100
    pub score: u8,
    pub status: LeadStatus,
    /// Observed budget, timeline, and problems in free text
    pub summary: String,
}

/// Per-turn engine output
///
/// Either a continuation (next question, conversation stays open) or a
/// terminal verdict. The outcome is `Some` if and only if `is_complete` is
/// true, so callers cannot read a score out of a partial reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualificationVerdict {
    /// Text shown to the prospect, whether or not the conversation ends
    pub next_question: String,
    pub is_complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<VerdictOutcome>,
}

impl QualificationVerdict {
    /// A verdict that keeps the conversation open
    pub fn continuation(next_question: impl Into<String>) -> Self {
        Self {
            next_question: next_question.into(),
            is_complete: false,
            outcome: None,
        }
    }

    /// A terminal verdict
    pub fn completed(
        next_question: impl Into<String>,
        score: u8,
        status: LeadStatus,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            next_question: next_question.into(),
            is_complete: true,
            outcome: Some(VerdictOutcome {
                score: score.min(100),
                status,
                summary: summary.into(),
            }),
        }
    }
}
