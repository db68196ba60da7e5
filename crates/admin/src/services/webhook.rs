//! Outbound webhook delivery.
//!
//! Deliveries never fail the caller: the outcome is a [`WebhookStatus`]
//! whose `Display` is the status line shown in the console.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tokio::task::JoinHandle;
use tracing::instrument;
use uuid::Uuid;

/// JSON body posted to a webhook.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub id: Uuid,
    pub event: String,
    pub sent_at: DateTime<Utc>,
    pub data: JsonValue,
}

impl WebhookPayload {
    pub fn new(event: impl Into<String>, data: JsonValue) -> Self {
        Self {
            id: Uuid::new_v4(),
            event: event.into(),
            sent_at: Utc::now(),
            data,
        }
    }
}

/// Outcome of one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookStatus {
    /// The endpoint answered with a 2xx status.
    Delivered { status: u16 },
    /// The endpoint answered with a non-2xx status.
    Rejected { status: u16 },
    /// No response (bad URL, connection refused, timeout).
    Failed { reason: String },
}

impl WebhookStatus {
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

impl std::fmt::Display for WebhookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Delivered { status } => write!(f, "delivered (HTTP {status})"),
            Self::Rejected { status } => write!(f, "rejected (HTTP {status})"),
            Self::Failed { reason } => write!(f, "failed: {reason}"),
        }
    }
}

/// HTTP client for webhook delivery.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: Client,
    timeout: Duration,
}

impl WebhookClient {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            timeout,
        }
    }

    /// POST `payload` to `url` and report what happened.
    #[instrument(skip(self, payload), fields(event = %payload.event))]
    pub async fn deliver(&self, url: &str, payload: &WebhookPayload) -> WebhookStatus {
        let target = match backoffice_core::parse_url(url) {
            Ok(target) => target,
            Err(e) => {
                return WebhookStatus::Failed {
                    reason: e.to_string(),
                };
            }
        };

        let result = self
            .client
            .post(target)
            .timeout(self.timeout)
            .json(payload)
            .send()
            .await;

        let status = match result {
            Ok(response) if response.status().is_success() => WebhookStatus::Delivered {
                status: response.status().as_u16(),
            },
            Ok(response) => WebhookStatus::Rejected {
                status: response.status().as_u16(),
            },
            Err(e) if e.is_timeout() => WebhookStatus::Failed {
                reason: format!("timed out after {}s", self.timeout.as_secs()),
            },
            Err(e) => WebhookStatus::Failed {
                reason: e.to_string(),
            },
        };

        if status.is_delivered() {
            tracing::info!(%status, "Webhook delivered");
        } else {
            tracing::warn!(%status, "Webhook not delivered");
        }
        status
    }

    /// Deliver in the background. The caller does not wait for the outcome.
    pub fn spawn(&self, url: String, payload: WebhookPayload) -> JoinHandle<WebhookStatus> {
        let client = self.clone();
        tokio::spawn(async move { client.deliver(&url, &payload).await })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_status_strings() {
        assert_eq!(
            WebhookStatus::Delivered { status: 200 }.to_string(),
            "delivered (HTTP 200)"
        );
        assert_eq!(
            WebhookStatus::Rejected { status: 503 }.to_string(),
            "rejected (HTTP 503)"
        );
        assert_eq!(
            WebhookStatus::Failed {
                reason: "connection refused".to_string()
            }
            .to_string(),
            "failed: connection refused"
        );
    }

    #[test]
    fn test_payload_shape() {
        let payload = WebhookPayload::new("webhook.test", json!({ "target": "specials" }));
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["event"], "webhook.test");
        assert_eq!(value["data"]["target"], "specials");
        assert!(value["sentAt"].is_string());
        assert!(value["id"].is_string());
    }

    #[tokio::test]
    async fn test_invalid_url_fails_without_request() {
        let client = WebhookClient::new(Duration::from_secs(1));
        let payload = WebhookPayload::new("webhook.test", json!({}));
        let status = client.deliver("not-a-url", &payload).await;
        assert!(matches!(status, WebhookStatus::Failed { .. }));
    }

    #[tokio::test]
    async fn test_spawned_delivery_reports_status() {
        let client = WebhookClient::new(Duration::from_secs(1));
        let payload = WebhookPayload::new("webhook.test", json!({}));
        let status = client.spawn("not-a-url".to_string(), payload).await.unwrap();
        assert!(!status.is_delivered());
    }
}
