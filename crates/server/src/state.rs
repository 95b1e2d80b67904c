//! Shared application state

use std::sync::Arc;

use qualify_config::Settings;
use qualify_core::{
    HotLeadNotifier, LanguageModel, LeadStore, ProfileStore, QualifierStore,
};
use qualify_engine::{IntakeCoordinator, QualificationEngine, QuestionGenerator};
use qualify_llm::GeminiBackend;
use qualify_notify::{NoopNotifier, ResendNotifier};
use qualify_store::InMemoryStore;

use crate::session::SessionManager;
use crate::ServerError;

/// Everything the handlers need, cheaply cloneable
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub qualifiers: Arc<dyn QualifierStore>,
    pub leads: Arc<dyn LeadStore>,
    pub coordinator: Arc<IntakeCoordinator>,
    pub generator: Arc<QuestionGenerator>,
    pub sessions: Arc<SessionManager>,
}

impl AppState {
    /// Wire the default production graph: Gemini backend, in-memory store,
    /// Resend notifier when enabled
    pub fn from_settings(settings: Settings) -> Result<Self, ServerError> {
        let llm: Arc<dyn LanguageModel> = Arc::new(
            GeminiBackend::new(settings.llm.clone())
                .map_err(|e| ServerError::Internal(e.to_string()))?,
        );

        let store = Arc::new(InMemoryStore::new());
        let notifier: Arc<dyn HotLeadNotifier> = if settings.notify.enabled {
            Arc::new(
                ResendNotifier::new(settings.notify.clone())
                    .map_err(|e| ServerError::Internal(e.to_string()))?,
            )
        } else {
            Arc::new(NoopNotifier)
        };

        Ok(Self::assemble(settings, llm, store.clone(), store.clone(), store, notifier))
    }

    /// Wire an explicit graph; tests and alternative deployments use this
    pub fn assemble(
        settings: Settings,
        llm: Arc<dyn LanguageModel>,
        qualifiers: Arc<dyn QualifierStore>,
        leads: Arc<dyn LeadStore>,
        profiles: Arc<dyn ProfileStore>,
        notifier: Arc<dyn HotLeadNotifier>,
    ) -> Self {
        let engine_config = settings.engine.clone();
        let coordinator = Arc::new(IntakeCoordinator::new(
            QualificationEngine::new(llm.clone(), engine_config.clone()),
            engine_config.clone(),
            leads.clone(),
            profiles,
            notifier,
        ));
        let generator = Arc::new(QuestionGenerator::new(llm, engine_config));
        let sessions = Arc::new(SessionManager::new(std::time::Duration::from_secs(
            settings.server.session_idle_secs,
        )));

        Self {
            settings: Arc::new(settings),
            qualifiers,
            leads,
            coordinator,
            generator,
            sessions,
        }
    }
}
