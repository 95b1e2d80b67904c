//! Qualification service HTTP server
//!
//! REST endpoints for qualifier management, question preview, and the
//! prospect chat loop.

pub mod http;
pub mod metrics;
pub mod session;
pub mod state;

pub use http::create_router;
pub use metrics::init_metrics;
pub use session::SessionManager;
pub use state::AppState;

use thiserror::Error;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Qualifier not found: {0}")]
    QualifierNotFound(String),

    #[error("A turn is already in flight for this session")]
    TurnInFlight,

    #[error("Conversation already complete")]
    ConversationComplete,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ServerError> for axum::http::StatusCode {
    fn from(err: ServerError) -> Self {
        use axum::http::StatusCode;
        match err {
            ServerError::SessionNotFound(_) | ServerError::QualifierNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            ServerError::TurnInFlight | ServerError::ConversationComplete => StatusCode::CONFLICT,
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
