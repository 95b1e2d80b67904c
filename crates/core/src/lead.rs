//! Lead records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::verdict::LeadStatus;

/// Best-effort contact details captured during the conversation
///
/// All fields may be empty if the prospect was never asked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Structured answers captured from the conversation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadResponses {
    /// Engine summary of observed budget/timeline/problems
    pub summary: String,
}

/// Data for creating a lead; the store assigns id and timestamp
#[derive(Debug, Clone)]
pub struct NewLead {
    pub qualifier_id: String,
    pub user_id: String,
    pub contact: ContactInfo,
    pub responses: LeadResponses,
    pub score: u8,
    pub status: LeadStatus,
    /// Serialized full conversation history
    pub transcript: String,
}

/// A persisted record of one completed qualification conversation
///
/// Created exactly once, at the moment the conversation completes.
/// Immutable afterwards except for owner-initiated edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub qualifier_id: String,
    pub user_id: String,
    pub contact: ContactInfo,
    pub responses: LeadResponses,
    pub score: u8,
    pub status: LeadStatus,
    pub transcript: String,
    pub created_at: DateTime<Utc>,
}

impl Lead {
    /// Materialize a new lead from creation data
    pub fn from_new(id: impl Into<String>, new: NewLead) -> Self {
        Self {
            id: id.into(),
            qualifier_id: new.qualifier_id,
            user_id: new.user_id,
            contact: new.contact,
            responses: new.responses,
            score: new.score,
            status: new.status,
            transcript: new.transcript,
            created_at: Utc::now(),
        }
    }
}
