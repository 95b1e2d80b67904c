//! HTTP endpoints

use std::time::Instant;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use qualify_core::{
    LeadStatus, QualificationCriteria, Qualifier, QualifierState,
};
use qualify_engine::EngineError;

use crate::metrics::{metrics_handler, record_completion, record_turn};
use crate::state::AppState;
use crate::ServerError;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(&state.settings.server.cors_origins);

    Router::new()
        // Qualifier endpoints
        .route("/api/qualifiers", post(create_qualifier).get(list_qualifiers))
        .route("/api/qualifiers/:id", get(get_qualifier))
        .route("/api/qualifiers/:id/leads", get(list_leads))
        .route("/api/qualifiers/:id/questions", post(preview_questions))
        // Chat session endpoints
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id", get(get_session).delete(delete_session))
        .route("/api/chat/:session_id", post(chat))
        // Probes and metrics
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_handler))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "invalid CORS origin, skipping");
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        return CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any);
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
}

// Qualifier endpoints

#[derive(Debug, Deserialize)]
struct CreateQualifierRequest {
    user_id: String,
    name: String,
    #[serde(default)]
    description: String,
    criteria: QualificationCriteria,
    #[serde(default)]
    booking_link: Option<String>,
}

async fn create_qualifier(
    State(state): State<AppState>,
    Json(request): Json<CreateQualifierRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), StatusCode> {
    request
        .criteria
        .validate()
        .map_err(|e| {
            tracing::debug!(error = %e, "rejected malformed rubric");
            StatusCode::UNPROCESSABLE_ENTITY
        })?;

    let qualifier = Qualifier {
        id: String::new(), // store assigns
        user_id: request.user_id,
        name: request.name,
        description: request.description,
        criteria: request.criteria,
        state: QualifierState::Active,
        created_at: Utc::now(),
        booking_link: request.booking_link,
    };

    let id = state
        .qualifiers
        .create_qualifier(qualifier)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "qualifier create failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": id }))))
}

#[derive(Debug, Deserialize)]
struct ListQualifiersQuery {
    user_id: String,
}

async fn list_qualifiers(
    State(state): State<AppState>,
    Query(query): Query<ListQualifiersQuery>,
) -> Result<Json<Vec<Qualifier>>, StatusCode> {
    let qualifiers = state
        .qualifiers
        .list_qualifiers(&query.user_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(qualifiers))
}

async fn get_qualifier(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Qualifier>, StatusCode> {
    let qualifier = state
        .qualifiers
        .get_qualifier(&id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(qualifier))
}

async fn list_leads(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let leads = state
        .leads
        .list_leads(&id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(serde_json::json!({
        "count": leads.len(),
        "leads": leads,
    })))
}

/// Preview/seed questions for a rubric; never fails thanks to the
/// generator's fallback list
async fn preview_questions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let qualifier = state
        .qualifiers
        .get_qualifier(&id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;

    let questions = state.generator.generate(&qualifier.criteria).await;
    Ok(Json(serde_json::json!({ "questions": questions })))
}

// Chat session endpoints

#[derive(Debug, Deserialize)]
struct CreateSessionRequest {
    qualifier_id: String,
}

#[derive(Debug, Serialize)]
struct CreateSessionResponse {
    session_id: String,
    greeting: String,
}

async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<CreateSessionResponse>), StatusCode> {
    let qualifier = state
        .qualifiers
        .get_qualifier(&request.qualifier_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;

    let session_id = Uuid::new_v4().to_string();
    let session = state.coordinator.start_session(session_id.clone(), qualifier);
    let greeting = session.greeting().to_string();
    state.sessions.insert(session);

    Ok((
        StatusCode::CREATED,
        Json(CreateSessionResponse { session_id, greeting }),
    ))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let session = state
        .sessions
        .snapshot(&id)
        .await
        .map_err(StatusCode::from)?;

    Ok(Json(serde_json::json!({
        "session_id": session.id,
        "qualifier_id": session.qualifier.id,
        "complete": session.is_complete(),
        "user_turns": session.user_turns,
        "lead_id": session.lead_id,
    })))
}

async fn delete_session(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    if state.sessions.remove(&id) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: String,
}

/// What the prospect-facing client renders after each turn
#[derive(Debug, Serialize)]
struct ChatResponse {
    reply: String,
    is_complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<LeadStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lead_id: Option<String>,
    /// Offered to HOT leads when the qualifier has one configured
    #[serde(skip_serializing_if = "Option::is_none")]
    booking_link: Option<String>,
}

async fn chat(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, StatusCode> {
    if request.message.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let mut session = state.sessions.acquire(&session_id).map_err(StatusCode::from)?;

    let started = Instant::now();
    let turn = state
        .coordinator
        .handle_turn(&mut session, &request.message)
        .await
        .map_err(|e| match e {
            EngineError::AlreadyComplete => StatusCode::from(ServerError::ConversationComplete),
            other => {
                tracing::error!(error = %other, session = %session_id, "turn failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        })?;
    record_turn(started.elapsed().as_millis() as f64);

    let outcome = turn.verdict.outcome;
    if let Some(outcome) = &outcome {
        record_completion(&outcome.status.to_string());
    }

    let booking_link = outcome
        .as_ref()
        .filter(|o| o.status == LeadStatus::Hot)
        .and_then(|_| session.qualifier.booking_link.clone());

    Ok(Json(ChatResponse {
        reply: turn.verdict.next_question,
        is_complete: turn.verdict.is_complete,
        score: outcome.as_ref().map(|o| o.score),
        status: outcome.as_ref().map(|o| o.status),
        summary: outcome.as_ref().map(|o| o.summary.clone()),
        lead_id: turn.lead_id,
        booking_link,
    }))
}

// Probes

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ready",
        "active_sessions": state.sessions.len(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use qualify_config::Settings;
    use qualify_core::{
        Error, GenerateRequest, GenerateResponse, HotLeadAlert, HotLeadNotifier, LanguageModel,
    };
    use qualify_store::InMemoryStore;
    use std::sync::Arc;

    struct StaticLlm(&'static str);

    #[async_trait]
    impl LanguageModel for StaticLlm {
        async fn generate(
            &self,
            _request: GenerateRequest,
        ) -> qualify_core::Result<GenerateResponse> {
            Ok(GenerateResponse::text(self.0))
        }

        fn model_name(&self) -> &str {
            "static"
        }
    }

    struct SilentNotifier;

    #[async_trait]
    impl HotLeadNotifier for SilentNotifier {
        async fn notify_hot_lead(&self, _alert: HotLeadAlert) -> qualify_core::Result<()> {
            Err(Error::Notify("always down".to_string()))
        }
    }

    fn test_state(reply: &'static str) -> AppState {
        let store = Arc::new(InMemoryStore::new());
        AppState::assemble(
            Settings::default(),
            Arc::new(StaticLlm(reply)),
            store.clone(),
            store.clone(),
            store,
            Arc::new(SilentNotifier),
        )
    }

    async fn seed_qualifier(state: &AppState) -> String {
        let qualifier = Qualifier {
            id: String::new(),
            user_id: "u1".to_string(),
            name: "Agency Intake".to_string(),
            description: String::new(),
            criteria: QualificationCriteria {
                ideal_persona: "SaaS founders".to_string(),
                min_budget: 5000,
                max_timeline_months: 3,
                key_problems: vec!["low conversion".to_string()],
            },
            state: QualifierState::Active,
            created_at: Utc::now(),
            booking_link: Some("https://cal.example/owner".to_string()),
        };
        state.qualifiers.create_qualifier(qualifier).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_session_returns_greeting() {
        let state = test_state(r#"{"next_question": "Q?", "is_complete": false}"#);
        let qualifier_id = seed_qualifier(&state).await;

        let (status, Json(response)) = create_session(
            State(state),
            Json(CreateSessionRequest { qualifier_id }),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert!(response.greeting.contains("Agency Intake"));
    }

    #[tokio::test]
    async fn test_create_session_unknown_qualifier() {
        let state = test_state(r#"{"next_question": "Q?", "is_complete": false}"#);
        let result = create_session(
            State(state),
            Json(CreateSessionRequest {
                qualifier_id: "missing".to_string(),
            }),
        )
        .await;
        assert_eq!(result.unwrap_err(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_chat_open_turn_has_no_outcome_fields() {
        let state = test_state(r#"{"next_question": "What budget?", "is_complete": false}"#);
        let qualifier_id = seed_qualifier(&state).await;
        let (_, Json(created)) = create_session(
            State(state.clone()),
            Json(CreateSessionRequest { qualifier_id }),
        )
        .await
        .unwrap();

        let Json(response) = chat(
            State(state),
            Path(created.session_id),
            Json(ChatRequest {
                message: "Hi".to_string(),
            }),
        )
        .await
        .unwrap();

        assert!(!response.is_complete);
        assert!(response.score.is_none());
        assert!(response.status.is_none());
        assert!(response.lead_id.is_none());
    }

    #[tokio::test]
    async fn test_chat_hot_completion_persists_and_offers_booking() {
        let state = test_state(
            r#"{"next_question": "We're a fit!", "is_complete": true,
                "score": 92, "status": "HOT", "summary": "Budget $8k"}"#,
        );
        let qualifier_id = seed_qualifier(&state).await;
        let (_, Json(created)) = create_session(
            State(state.clone()),
            Json(CreateSessionRequest {
                qualifier_id: qualifier_id.clone(),
            }),
        )
        .await
        .unwrap();

        let Json(response) = chat(
            State(state.clone()),
            Path(created.session_id.clone()),
            Json(ChatRequest {
                message: "budget is $8000".to_string(),
            }),
        )
        .await
        .unwrap();

        assert!(response.is_complete);
        assert_eq!(response.score, Some(92));
        assert_eq!(response.status, Some(LeadStatus::Hot));
        assert!(response.booking_link.is_some());
        // the notifier always fails; persistence must be unaffected
        let lead_id = response.lead_id.unwrap();
        let leads = state.leads.list_leads(&qualifier_id).await.unwrap();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].id, lead_id);

        // conversation is terminal now
        let result = chat(
            State(state),
            Path(created.session_id),
            Json(ChatRequest {
                message: "hello again".to_string(),
            }),
        )
        .await;
        assert_eq!(result.unwrap_err(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_chat_fault_degrades_but_succeeds() {
        let state = test_state("not json");
        let qualifier_id = seed_qualifier(&state).await;
        let (_, Json(created)) = create_session(
            State(state.clone()),
            Json(CreateSessionRequest { qualifier_id }),
        )
        .await
        .unwrap();

        let Json(response) = chat(
            State(state),
            Path(created.session_id),
            Json(ChatRequest {
                message: "Hi".to_string(),
            }),
        )
        .await
        .unwrap();

        assert!(!response.is_complete);
        assert!(!response.reply.is_empty());
    }

    #[tokio::test]
    async fn test_chat_rejects_blank_message() {
        let state = test_state(r#"{"next_question": "Q?", "is_complete": false}"#);
        let result = chat(
            State(state),
            Path("any".to_string()),
            Json(ChatRequest {
                message: "   ".to_string(),
            }),
        )
        .await;
        assert_eq!(result.unwrap_err(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_preview_questions_fallback_on_bad_model() {
        let state = test_state("garbage");
        let qualifier_id = seed_qualifier(&state).await;

        let Json(response) = preview_questions(State(state), Path(qualifier_id))
            .await
            .unwrap();
        let questions = response["questions"].as_array().unwrap();
        assert_eq!(questions.len(), 3);
    }
}
