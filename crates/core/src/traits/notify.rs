//! Notification trait seam

use async_trait::async_trait;

use crate::Result;

/// Everything a HOT-lead notification carries
#[derive(Debug, Clone)]
pub struct HotLeadAlert {
    pub lead_id: String,
    pub lead_name: String,
    pub lead_email: String,
    pub score: u8,
    pub summary: String,
    /// Resolved owner address the alert is delivered to
    pub owner_email: String,
}

/// Fire-and-forget HOT lead notification
///
/// Dispatch failures must never fail or roll back lead creation; the
/// intake layer logs and swallows errors from this trait.
#[async_trait]
pub trait HotLeadNotifier: Send + Sync {
    async fn notify_hot_lead(&self, alert: HotLeadAlert) -> Result<()>;
}
