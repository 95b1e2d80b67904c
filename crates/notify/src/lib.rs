//! HOT-lead notification
//!
//! The intake layer fires one alert per HOT lead, fire-and-forget. This
//! crate ships the Resend email dispatcher plus a no-op notifier for
//! development and tests. Failures here are always swallowed upstream; a
//! missed email never blocks lead persistence.

pub mod resend;

pub use resend::ResendNotifier;

use async_trait::async_trait;
use thiserror::Error;

use qualify_core::{HotLeadAlert, HotLeadNotifier, Result};

/// Notification errors
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Dispatch failed: {0}")]
    Dispatch(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<NotifyError> for qualify_core::Error {
    fn from(err: NotifyError) -> Self {
        qualify_core::Error::Notify(err.to_string())
    }
}

/// Notifier that only logs, used when notifications are disabled
#[derive(Default)]
pub struct NoopNotifier;

#[async_trait]
impl HotLeadNotifier for NoopNotifier {
    async fn notify_hot_lead(&self, alert: HotLeadAlert) -> Result<()> {
        tracing::info!(
            lead = %alert.lead_id,
            score = alert.score,
            "HOT lead alert suppressed (notifications disabled)"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_never_fails() {
        let notifier = NoopNotifier;
        let result = notifier
            .notify_hot_lead(HotLeadAlert {
                lead_id: "l1".to_string(),
                lead_name: "Guest User".to_string(),
                lead_email: String::new(),
                score: 95,
                summary: "s".to_string(),
                owner_email: "owner@example.com".to_string(),
            })
            .await;
        assert!(result.is_ok());
    }
}
