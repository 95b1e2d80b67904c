//! Intake coordination
//!
//! The engine itself is stateless; everything conversational lives here, on
//! the caller side of the contract. [`IntakeSession`] is the per-conversation
//! state machine (`Open` -> `Complete`, no way back), and
//! [`IntakeCoordinator`] wires a turn through the engine and the external
//! collaborators: lead persistence on the completion transition, owner
//! lookup and notification when the verdict is HOT.

use std::sync::Arc;

use qualify_config::EngineConfig;
use qualify_core::{
    message::serialize_transcript, ChatMessage, ContactInfo, HotLeadAlert, HotLeadNotifier,
    LeadResponses, LeadStatus, LeadStore, NewLead, ProfileStore, QualificationVerdict, Qualifier,
};

use crate::engine::QualificationEngine;
use crate::EngineError;

/// Conversation lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Open,
    /// Terminal; no further engine calls are made for this conversation
    Complete,
}

/// Caller-held state for one qualification conversation
#[derive(Debug, Clone)]
pub struct IntakeSession {
    pub id: String,
    pub qualifier: Qualifier,
    /// Append-only message history, seeded with the assistant greeting
    pub history: Vec<ChatMessage>,
    pub state: SessionState,
    /// Number of prospect turns so far
    pub user_turns: u32,
    /// Best-effort contact details; empty unless the caller captured them
    pub contact: ContactInfo,
    /// Set once, when the lead is persisted
    pub lead_id: Option<String>,
}

impl IntakeSession {
    /// The greeting shown before any engine call
    pub fn greeting(&self) -> &str {
        self.history
            .first()
            .map(|m| m.content.as_str())
            .unwrap_or_default()
    }

    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Complete
    }
}

/// Result of one intake turn
#[derive(Debug, Clone)]
pub struct IntakeTurn {
    pub verdict: QualificationVerdict,
    /// Present from the completing turn onward
    pub lead_id: Option<String>,
}

/// Drives conversations end to end
pub struct IntakeCoordinator {
    engine: QualificationEngine,
    config: EngineConfig,
    leads: Arc<dyn LeadStore>,
    profiles: Arc<dyn ProfileStore>,
    notifier: Arc<dyn HotLeadNotifier>,
}

impl IntakeCoordinator {
    pub fn new(
        engine: QualificationEngine,
        config: EngineConfig,
        leads: Arc<dyn LeadStore>,
        profiles: Arc<dyn ProfileStore>,
        notifier: Arc<dyn HotLeadNotifier>,
    ) -> Self {
        Self {
            engine,
            config,
            leads,
            profiles,
            notifier,
        }
    }

    /// Open a session for a qualifier, seeding the greeting
    pub fn start_session(&self, id: impl Into<String>, qualifier: Qualifier) -> IntakeSession {
        let greeting = self.config.greeting(&qualifier.name);
        IntakeSession {
            id: id.into(),
            qualifier,
            history: vec![ChatMessage::assistant(greeting)],
            state: SessionState::Open,
            user_turns: 0,
            contact: ContactInfo {
                name: "Guest User".to_string(),
                ..Default::default()
            },
            lead_id: None,
        }
    }

    /// Process one prospect message
    ///
    /// Appends the message, runs the engine, appends the reply, and on the
    /// first completed verdict persists the lead and gates the HOT
    /// notification. Persistence faults propagate and leave the session
    /// open; notification faults are logged and swallowed.
    pub async fn handle_turn(
        &self,
        session: &mut IntakeSession,
        user_input: &str,
    ) -> Result<IntakeTurn, EngineError> {
        if session.is_complete() {
            return Err(EngineError::AlreadyComplete);
        }

        session.history.push(ChatMessage::user(user_input));
        session.user_turns += 1;

        let mut verdict = self
            .engine
            .analyze(&session.history, user_input, &session.qualifier.criteria)
            .await;

        if !verdict.is_complete && self.turn_cap_reached(session.user_turns) {
            tracing::info!(
                session = %session.id,
                turns = session.user_turns,
                "turn cap reached, forcing conservative completion"
            );
            verdict = self.forced_completion();
        }

        session.history.push(ChatMessage::assistant(&verdict.next_question));

        if verdict.is_complete {
            let lead_id = self.persist_lead(session, &verdict).await?;
            session.state = SessionState::Complete;
            session.lead_id = Some(lead_id.clone());

            self.maybe_notify(session, &verdict, &lead_id).await;

            return Ok(IntakeTurn {
                verdict,
                lead_id: Some(lead_id),
            });
        }

        Ok(IntakeTurn {
            verdict,
            lead_id: None,
        })
    }

    fn turn_cap_reached(&self, user_turns: u32) -> bool {
        self.config.max_turns > 0 && user_turns >= self.config.max_turns
    }

    /// Conservative verdict when the cap fires: WARM, mid score, an honest
    /// summary about the inconclusive data
    fn forced_completion(&self) -> QualificationVerdict {
        QualificationVerdict::completed(
            "Thanks so much for your time! We'll review everything you shared and \
             someone will follow up with next steps.",
            50,
            LeadStatus::Warm,
            "Conversation reached the configured turn limit before a confident \
             decision; collected answers were inconclusive.",
        )
    }

    async fn persist_lead(
        &self,
        session: &IntakeSession,
        verdict: &QualificationVerdict,
    ) -> Result<String, EngineError> {
        // handle_turn only calls this with a completed verdict
        let outcome = verdict
            .outcome
            .as_ref()
            .ok_or_else(|| EngineError::Session("completed verdict without outcome".into()))?;

        let lead = NewLead {
            qualifier_id: session.qualifier.id.clone(),
            user_id: session.qualifier.user_id.clone(),
            contact: session.contact.clone(),
            responses: LeadResponses {
                summary: if outcome.summary.is_empty() {
                    "No summary provided".to_string()
                } else {
                    outcome.summary.clone()
                },
            },
            score: outcome.score,
            status: outcome.status,
            transcript: serialize_transcript(&session.history),
        };

        let lead_id = self.leads.create_lead(lead).await?;
        tracing::info!(
            session = %session.id,
            lead = %lead_id,
            score = outcome.score,
            status = %outcome.status,
            "lead persisted"
        );
        Ok(lead_id)
    }

    /// Fire the HOT alert iff the status is HOT; all faults are swallowed
    async fn maybe_notify(
        &self,
        session: &IntakeSession,
        verdict: &QualificationVerdict,
        lead_id: &str,
    ) {
        let Some(outcome) = verdict.outcome.as_ref() else {
            return;
        };
        if outcome.status != LeadStatus::Hot {
            return;
        }

        let owner_email = match self
            .profiles
            .get_user_profile(&session.qualifier.user_id)
            .await
        {
            Ok(Some(profile)) if !profile.email.is_empty() => profile.email,
            Ok(_) => {
                tracing::warn!(
                    user = %session.qualifier.user_id,
                    "no owner email on record, skipping HOT lead alert"
                );
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "owner profile lookup failed, skipping HOT lead alert");
                return;
            }
        };

        let alert = HotLeadAlert {
            lead_id: lead_id.to_string(),
            lead_name: session.contact.name.clone(),
            lead_email: session.contact.email.clone(),
            score: outcome.score,
            summary: outcome.summary.clone(),
            owner_email,
        };

        if let Err(e) = self.notifier.notify_hot_lead(alert).await {
            tracing::warn!(error = %e, lead = %lead_id, "HOT lead notification failed");
        }
    }
}
