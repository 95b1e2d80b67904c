//! Persistence trait seams
//!
//! The engine treats storage as a narrow external collaborator: a document
//! store keyed by id, with per-collection lookups. Implementations live in
//! `qualify-store`.

use async_trait::async_trait;

use crate::{Lead, NewLead, Qualifier, Result, UserProfile};

/// Read-only access to qualifiers
///
/// Supplies the rubric for a conversation session.
#[async_trait]
pub trait QualifierStore: Send + Sync {
    /// Look up a qualifier by id
    async fn get_qualifier(&self, id: &str) -> Result<Option<Qualifier>>;

    /// Persist a new qualifier, returning its id
    async fn create_qualifier(&self, qualifier: Qualifier) -> Result<String>;

    /// List qualifiers owned by a user
    async fn list_qualifiers(&self, user_id: &str) -> Result<Vec<Qualifier>>;
}

/// Lead persistence
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Persist a completed qualification, returning the lead id
    ///
    /// Called exactly once per conversation, on the completion transition.
    /// Failures propagate: losing a completed qualification is worse than a
    /// visible error.
    async fn create_lead(&self, lead: NewLead) -> Result<String>;

    /// List leads captured by a qualifier
    async fn list_leads(&self, qualifier_id: &str) -> Result<Vec<Lead>>;
}

/// Owner profile lookup
///
/// Used only when a completed verdict is HOT, to resolve the notification
/// address.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_user_profile(&self, uid: &str) -> Result<Option<UserProfile>>;
}
