//! Core traits and types for the lead qualification service
//!
//! This crate provides foundational types used across all other crates:
//! - Qualification rubric and verdict types
//! - Chat message types
//! - Lead and qualifier records
//! - Core traits for pluggable backends (LLM, stores, notification)
//! - Error types

pub mod criteria;
pub mod error;
pub mod lead;
pub mod llm_types;
pub mod message;
pub mod qualifier;
pub mod traits;
pub mod verdict;

pub use criteria::QualificationCriteria;
pub use error::{Error, Result};
pub use lead::{ContactInfo, Lead, LeadResponses, NewLead};
pub use llm_types::{FinishReason, GenerateRequest, GenerateResponse};
pub use message::{ChatMessage, Role};
pub use qualifier::{Qualifier, QualifierState, UserProfile};
pub use verdict::{LeadStatus, QualificationVerdict, VerdictOutcome};

pub use traits::{
    HotLeadAlert, HotLeadNotifier, LanguageModel, LeadStore, ProfileStore, QualifierStore,
};
