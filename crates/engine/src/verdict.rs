//! Verdict wire shape and validation
//!
//! The model returns a flat JSON object; [`RawVerdict`] is its schema.
//! [`validate_verdict`] tightens it into the typed [`QualificationVerdict`]:
//! scores clamp to 0-100, unrecognized status strings map to WARM, a missing
//! summary becomes empty. Content the model got structurally wrong enough to
//! be unusable (no parse, blank reply) is a fault handled by the caller.

use serde::Deserialize;

use qualify_core::{LeadStatus, QualificationVerdict};

/// Verdict exactly as the model emits it, before validation
#[derive(Debug, Clone, Deserialize)]
pub struct RawVerdict {
    #[serde(default)]
    pub next_question: String,
    #[serde(default)]
    pub is_complete: bool,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

fn parse_status(raw: Option<&str>) -> LeadStatus {
    match raw.map(|s| s.trim().to_ascii_uppercase()).as_deref() {
        Some("HOT") => LeadStatus::Hot,
        Some("COLD") => LeadStatus::Cold,
        Some("WARM") => LeadStatus::Warm,
        other => {
            if let Some(other) = other {
                tracing::warn!(status = other, "unrecognized lead status, defaulting to WARM");
            }
            LeadStatus::Warm
        }
    }
}

fn clamp_score(raw: Option<f64>) -> u8 {
    match raw {
        Some(score) if score.is_finite() => score.round().clamp(0.0, 100.0) as u8,
        _ => 0,
    }
}

/// Tighten a raw model verdict into the typed shape
///
/// Returns `None` when the verdict is unusable (blank reply text), which
/// callers treat identically to a parse failure.
pub fn validate_verdict(raw: RawVerdict) -> Option<QualificationVerdict> {
    let next_question = raw.next_question.trim().to_string();
    if next_question.is_empty() {
        return None;
    }

    if !raw.is_complete {
        // Partial reply: score/status/summary must not leak through
        return Some(QualificationVerdict::continuation(next_question));
    }

    Some(QualificationVerdict::completed(
        next_question,
        clamp_score(raw.score),
        parse_status(raw.status.as_deref()),
        raw.summary.unwrap_or_default(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_discards_outcome_fields() {
        let raw = RawVerdict {
            next_question: "What is your budget?".to_string(),
            is_complete: false,
            score: Some(90.0),
            status: Some("HOT".to_string()),
            summary: Some("should not appear".to_string()),
        };

        let verdict = validate_verdict(raw).unwrap();
        assert!(!verdict.is_complete);
        assert!(verdict.outcome.is_none());
    }

    #[test]
    fn test_complete_verdict_carries_outcome() {
        let raw = RawVerdict {
            next_question: "Thanks, we're a great fit!".to_string(),
            is_complete: true,
            score: Some(88.0),
            status: Some("HOT".to_string()),
            summary: Some("Budget $8k".to_string()),
        };

        let verdict = validate_verdict(raw).unwrap();
        let outcome = verdict.outcome.unwrap();
        assert_eq!(outcome.score, 88);
        assert_eq!(outcome.status, LeadStatus::Hot);
        assert_eq!(outcome.summary, "Budget $8k");
    }

    #[test]
    fn test_score_clamped_to_100() {
        let raw = RawVerdict {
            next_question: "Done".to_string(),
            is_complete: true,
            score: Some(250.0),
            status: Some("HOT".to_string()),
            summary: None,
        };
        assert_eq!(validate_verdict(raw).unwrap().outcome.unwrap().score, 100);
    }

    #[test]
    fn test_negative_and_missing_score_become_zero() {
        for score in [Some(-5.0), None, Some(f64::NAN)] {
            let raw = RawVerdict {
                next_question: "Done".to_string(),
                is_complete: true,
                score,
                status: Some("COLD".to_string()),
                summary: None,
            };
            assert_eq!(validate_verdict(raw).unwrap().outcome.unwrap().score, 0);
        }
    }

    #[test]
    fn test_unknown_status_maps_to_warm() {
        let raw = RawVerdict {
            next_question: "Done".to_string(),
            is_complete: true,
            score: Some(60.0),
            status: Some("LUKEWARM".to_string()),
            summary: None,
        };
        assert_eq!(
            validate_verdict(raw).unwrap().outcome.unwrap().status,
            LeadStatus::Warm
        );
    }

    #[test]
    fn test_status_case_insensitive() {
        let raw = RawVerdict {
            next_question: "Done".to_string(),
            is_complete: true,
            score: Some(20.0),
            status: Some("cold".to_string()),
            summary: None,
        };
        assert_eq!(
            validate_verdict(raw).unwrap().outcome.unwrap().status,
            LeadStatus::Cold
        );
    }

    #[test]
    fn test_missing_summary_becomes_empty() {
        let raw = RawVerdict {
            next_question: "Done".to_string(),
            is_complete: true,
            score: Some(70.0),
            status: Some("WARM".to_string()),
            summary: None,
        };
        assert_eq!(validate_verdict(raw).unwrap().outcome.unwrap().summary, "");
    }

    #[test]
    fn test_blank_next_question_is_unusable() {
        let raw = RawVerdict {
            next_question: "   ".to_string(),
            is_complete: false,
            score: None,
            status: None,
            summary: None,
        };
        assert!(validate_verdict(raw).is_none());
    }
}
