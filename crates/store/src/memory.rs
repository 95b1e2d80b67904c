//! In-memory document store

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use qualify_core::{
    Lead, LeadStore, NewLead, ProfileStore, Qualifier, QualifierStore, Result, UserProfile,
};

/// DashMap-backed store implementing all three store traits
///
/// Collections are independent maps keyed by id, mirroring the document
/// database the production deployment would use. Sessions do not touch this
/// store; only durable records live here.
#[derive(Default)]
pub struct InMemoryStore {
    qualifiers: DashMap<String, Qualifier>,
    leads: DashMap<String, Lead>,
    profiles: DashMap<String, UserProfile>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an owner profile (account creation is out of scope)
    pub fn insert_profile(&self, profile: UserProfile) {
        self.profiles.insert(profile.uid.clone(), profile);
    }
}

#[async_trait]
impl QualifierStore for InMemoryStore {
    async fn get_qualifier(&self, id: &str) -> Result<Option<Qualifier>> {
        Ok(self.qualifiers.get(id).map(|entry| entry.value().clone()))
    }

    async fn create_qualifier(&self, mut qualifier: Qualifier) -> Result<String> {
        if qualifier.id.is_empty() {
            qualifier.id = Uuid::new_v4().to_string();
        }
        let id = qualifier.id.clone();
        self.qualifiers.insert(id.clone(), qualifier);
        Ok(id)
    }

    async fn list_qualifiers(&self, user_id: &str) -> Result<Vec<Qualifier>> {
        let mut qualifiers: Vec<Qualifier> = self
            .qualifiers
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        qualifiers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(qualifiers)
    }
}

#[async_trait]
impl LeadStore for InMemoryStore {
    async fn create_lead(&self, new: NewLead) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let lead = Lead::from_new(id.clone(), new);
        tracing::debug!(lead = %id, qualifier = %lead.qualifier_id, "lead stored");
        self.leads.insert(id.clone(), lead);
        Ok(id)
    }

    async fn list_leads(&self, qualifier_id: &str) -> Result<Vec<Lead>> {
        let mut leads: Vec<Lead> = self
            .leads
            .iter()
            .filter(|entry| entry.qualifier_id == qualifier_id)
            .map(|entry| entry.value().clone())
            .collect();
        leads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(leads)
    }
}

#[async_trait]
impl ProfileStore for InMemoryStore {
    async fn get_user_profile(&self, uid: &str) -> Result<Option<UserProfile>> {
        Ok(self.profiles.get(uid).map(|entry| entry.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use qualify_core::{ContactInfo, LeadResponses, LeadStatus, QualificationCriteria, QualifierState};

    fn qualifier(id: &str, user_id: &str) -> Qualifier {
        Qualifier {
            id: id.to_string(),
            user_id: user_id.to_string(),
            name: "Test".to_string(),
            description: String::new(),
            criteria: QualificationCriteria {
                ideal_persona: "founders".to_string(),
                min_budget: 1000,
                max_timeline_months: 6,
                key_problems: vec!["churn".to_string()],
            },
            state: QualifierState::Active,
            created_at: Utc::now(),
            booking_link: None,
        }
    }

    fn new_lead(qualifier_id: &str) -> NewLead {
        NewLead {
            qualifier_id: qualifier_id.to_string(),
            user_id: "u1".to_string(),
            contact: ContactInfo::default(),
            responses: LeadResponses {
                summary: "s".to_string(),
            },
            score: 75,
            status: LeadStatus::Warm,
            transcript: "[]".to_string(),
        }
    }

    #[tokio::test]
    async fn test_qualifier_round_trip() {
        let store = InMemoryStore::new();
        let id = store.create_qualifier(qualifier("", "u1")).await.unwrap();
        assert!(!id.is_empty());

        let fetched = store.get_qualifier(&id).await.unwrap().unwrap();
        assert_eq!(fetched.user_id, "u1");
        assert!(store.get_qualifier("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_qualifiers_filters_by_owner() {
        let store = InMemoryStore::new();
        store.create_qualifier(qualifier("q1", "u1")).await.unwrap();
        store.create_qualifier(qualifier("q2", "u2")).await.unwrap();

        let mine = store.list_qualifiers("u1").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, "q1");
    }

    #[tokio::test]
    async fn test_leads_filter_by_qualifier() {
        let store = InMemoryStore::new();
        store.create_lead(new_lead("q1")).await.unwrap();
        store.create_lead(new_lead("q1")).await.unwrap();
        store.create_lead(new_lead("q2")).await.unwrap();

        assert_eq!(store.list_leads("q1").await.unwrap().len(), 2);
        assert_eq!(store.list_leads("q3").await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_profile_lookup() {
        let store = InMemoryStore::new();
        store.insert_profile(UserProfile {
            uid: "u1".to_string(),
            email: "owner@example.com".to_string(),
            display_name: "Owner".to_string(),
            business_name: None,
            booking_link: None,
        });

        let profile = store.get_user_profile("u1").await.unwrap().unwrap();
        assert_eq!(profile.email, "owner@example.com");
        assert!(store.get_user_profile("u2").await.unwrap().is_none());
    }
}
