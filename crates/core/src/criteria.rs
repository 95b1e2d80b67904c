//! Qualification rubric

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Rubric a prospect is judged against
///
/// Owned by a [`crate::Qualifier`] and supplied unchanged to every engine
/// invocation. The engine never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualificationCriteria {
    /// Free-text description of the ideal customer
    pub ideal_persona: String,
    /// Minimum acceptable budget (whole currency units)
    pub min_budget: u64,
    /// Longest acceptable timeline in months
    pub max_timeline_months: u32,
    /// Problems the business solves, in priority order
    pub key_problems: Vec<String>,
}

impl QualificationCriteria {
    /// Check well-formedness
    ///
    /// A degenerate rubric degrades prompt quality rather than correctness,
    /// so the engine accepts anything; callers creating qualifiers should
    /// validate at the edge.
    pub fn validate(&self) -> Result<()> {
        if self.ideal_persona.trim().is_empty() {
            return Err(Error::InvalidInput("ideal_persona must not be empty".into()));
        }
        if self.max_timeline_months == 0 {
            return Err(Error::InvalidInput(
                "max_timeline_months must be positive".into(),
            ));
        }
        if self.key_problems.is_empty() {
            return Err(Error::InvalidInput("key_problems must not be empty".into()));
        }
        if self.key_problems.iter().any(|p| p.trim().is_empty()) {
            return Err(Error::InvalidInput(
                "key_problems must not contain blank entries".into(),
            ));
        }
        Ok(())
    }
}
