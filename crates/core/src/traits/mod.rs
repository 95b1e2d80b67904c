//! Trait seams for pluggable collaborators

pub mod llm;
pub mod notify;
pub mod store;

pub use llm::LanguageModel;
pub use notify::{HotLeadAlert, HotLeadNotifier};
pub use store::{LeadStore, ProfileStore, QualifierStore};
