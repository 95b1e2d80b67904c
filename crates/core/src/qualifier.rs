//! Qualifier and owner profile records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::criteria::QualificationCriteria;

/// Publication state of a qualifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QualifierState {
    Active,
    #[default]
    Draft,
}

/// A named, owner-configured rubric plus its conversational agent
///
/// The unit a prospect interacts with: one qualifier, one chat link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Qualifier {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub criteria: QualificationCriteria,
    #[serde(default)]
    pub state: QualifierState,
    pub created_at: DateTime<Utc>,
    /// Booking link offered to HOT leads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_link: Option<String>,
}

/// Account profile of a qualifier owner
///
/// The engine only ever reads the email, to resolve a HOT-lead
/// notification address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub uid: String,
    pub email: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualifier_state_default_is_draft() {
        assert_eq!(QualifierState::default(), QualifierState::Draft);
    }

    #[test]
    fn test_qualifier_deserializes_without_optionals() {
        let json = r#"{
            "id": "q1",
            "user_id": "u1",
            "name": "Agency Intake",
            "criteria": {
                "ideal_persona": "SaaS founders",
                "min_budget": 5000,
                "max_timeline_months": 3,
                "key_problems": ["low conversion"]
            },
            "created_at": "2026-01-01T00:00:00Z"
        }"#;

        let qualifier: Qualifier = serde_json::from_str(json).unwrap();
        assert_eq!(qualifier.state, QualifierState::Draft);
        assert!(qualifier.booking_link.is_none());
    }
}
