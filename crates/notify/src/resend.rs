//! Resend email dispatcher

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use qualify_config::NotifyConfig;
use qualify_core::{HotLeadAlert, HotLeadNotifier, Result};

use crate::NotifyError;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// Sends HOT-lead alert emails through the Resend API
pub struct ResendNotifier {
    client: Client,
    config: NotifyConfig,
    endpoint: String,
}

impl ResendNotifier {
    pub fn new(config: NotifyConfig) -> std::result::Result<Self, NotifyError> {
        if config.api_key.is_none() {
            return Err(NotifyError::Configuration(
                "notifications enabled but no Resend API key configured".into(),
            ));
        }
        let client = Client::builder()
            .build()
            .map_err(|e| NotifyError::Configuration(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            endpoint: RESEND_ENDPOINT.to_string(),
        })
    }

    fn subject(alert: &HotLeadAlert) -> String {
        let name = if alert.lead_name.is_empty() {
            "New Lead"
        } else {
            &alert.lead_name
        };
        format!("HOT LEAD ALERT: {} scored {}/100", name, alert.score)
    }

    fn body_html(&self, alert: &HotLeadAlert) -> String {
        let or_na = |s: &str| {
            if s.is_empty() {
                "N/A".to_string()
            } else {
                s.to_string()
            }
        };
        let summary = if alert.summary.is_empty() {
            "No summary provided."
        } else {
            &alert.summary
        };

        format!(
            "<h1>New Hot Lead Detected!</h1>\
             <p><strong>Name:</strong> {name}</p>\
             <p><strong>Email:</strong> {email}</p>\
             <p><strong>Score:</strong> {score}</p>\
             <p><strong>Summary:</strong></p>\
             <blockquote>{summary}</blockquote>\
             <br />\
             <a href=\"{app_url}/dashboard/leads/{lead_id}\">View Lead in Dashboard</a>",
            name = or_na(&alert.lead_name),
            email = or_na(&alert.lead_email),
            score = alert.score,
            summary = summary,
            app_url = self.config.app_url,
            lead_id = alert.lead_id,
        )
    }
}

#[derive(Debug, Serialize)]
struct ResendEmail<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: String,
    html: String,
}

#[async_trait]
impl HotLeadNotifier for ResendNotifier {
    async fn notify_hot_lead(&self, alert: HotLeadAlert) -> Result<()> {
        // Checked in new(), but the config may have been built by hand
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            NotifyError::Configuration("no Resend API key configured".into())
        })?;

        let email = ResendEmail {
            from: &self.config.from_address,
            to: vec![&alert.owner_email],
            subject: Self::subject(&alert),
            html: self.body_html(&alert),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&email)
            .send()
            .await
            .map_err(|e| NotifyError::Dispatch(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Dispatch(format!("{}: {}", status, body)).into());
        }

        tracing::info!(lead = %alert.lead_id, to = %alert.owner_email, "HOT lead alert sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert() -> HotLeadAlert {
        HotLeadAlert {
            lead_id: "lead-1".to_string(),
            lead_name: String::new(),
            lead_email: String::new(),
            score: 91,
            summary: String::new(),
            owner_email: "owner@example.com".to_string(),
        }
    }

    #[test]
    fn test_requires_api_key() {
        let result = ResendNotifier::new(NotifyConfig {
            enabled: true,
            api_key: None,
            ..Default::default()
        });
        assert!(matches!(result, Err(NotifyError::Configuration(_))));
    }

    #[test]
    fn test_subject_handles_missing_name() {
        let subject = ResendNotifier::subject(&alert());
        assert!(subject.contains("New Lead"));
        assert!(subject.contains("91/100"));
    }

    #[test]
    fn test_body_includes_dashboard_link() {
        let notifier = ResendNotifier::new(NotifyConfig {
            enabled: true,
            api_key: Some("re_test".to_string()),
            ..Default::default()
        })
        .unwrap();

        let body = notifier.body_html(&alert());
        assert!(body.contains("/dashboard/leads/lead-1"));
        assert!(body.contains("No summary provided."));
        assert!(body.contains("N/A"));
    }
}
