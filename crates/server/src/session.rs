//! Chat session management
//!
//! Sessions are in-memory: the engine is stateless and everything durable
//! lands in the lead store at completion, so losing a session on restart
//! only abandons an unfinished conversation.
//!
//! One turn at a time per session: the intake contract forbids overlapping
//! engine invocations for the same conversation, so the manager hands out
//! the session behind a `try_lock` and callers surface a conflict while a
//! turn is in flight.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use qualify_engine::IntakeSession;

use crate::ServerError;

/// One managed session
pub struct SessionEntry {
    session: Arc<Mutex<IntakeSession>>,
    last_activity: parking_lot::Mutex<Instant>,
}

impl SessionEntry {
    fn new(session: IntakeSession) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            last_activity: parking_lot::Mutex::new(Instant::now()),
        }
    }

    fn touch(&self) {
        *self.last_activity.lock() = Instant::now();
    }

    fn idle_for(&self) -> Duration {
        self.last_activity.lock().elapsed()
    }
}

/// In-memory session registry with idle expiry
pub struct SessionManager {
    sessions: DashMap<String, Arc<SessionEntry>>,
    idle_timeout: Duration,
}

impl SessionManager {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            idle_timeout,
        }
    }

    /// Register a freshly started session
    pub fn insert(&self, session: IntakeSession) {
        self.sessions
            .insert(session.id.clone(), Arc::new(SessionEntry::new(session)));
    }

    /// Acquire a session for one turn
    ///
    /// Fails with [`ServerError::TurnInFlight`] when a turn is still being
    /// processed, which is how the caller-side sequencing contract is
    /// enforced over HTTP.
    pub fn acquire(&self, id: &str) -> Result<OwnedMutexGuard<IntakeSession>, ServerError> {
        let entry = self
            .sessions
            .get(id)
            .ok_or_else(|| ServerError::SessionNotFound(id.to_string()))?;
        entry.touch();

        entry
            .session
            .clone()
            .try_lock_owned()
            .map_err(|_| ServerError::TurnInFlight)
    }

    /// Snapshot a session without acquiring it for a turn
    pub async fn snapshot(&self, id: &str) -> Result<IntakeSession, ServerError> {
        let entry = self
            .sessions
            .get(id)
            .map(|e| e.value().clone())
            .ok_or_else(|| ServerError::SessionNotFound(id.to_string()))?;
        let session = entry.session.lock().await.clone();
        Ok(session)
    }

    pub fn remove(&self, id: &str) -> bool {
        self.sessions.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop sessions idle past the configured timeout, returning the count
    pub fn sweep_idle(&self) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, entry| entry.idle_for() < self.idle_timeout);
        before - self.sessions.len()
    }

    /// Periodic sweep loop, spawned at startup
    pub async fn run_sweeper(self: Arc<Self>, interval: Duration) {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let dropped = self.sweep_idle();
            if dropped > 0 {
                tracing::debug!(dropped, "expired idle chat sessions");
            }
        }
    }
}
