//! Integration webhook test buttons.

use axum::{
    Json, Router,
    extract::State,
    routing::post,
};
use backoffice_core::{IntegrationSettings, non_blank};
use serde_json::json;
use tracing::instrument;

use crate::error::AppError;
use crate::extract::AppPath;
use crate::services::WebhookPayload;
use crate::state::AppState;
use crate::toast::{Toast, ToastResponse};

/// Event name for a test button press.
pub const TEST_EVENT: &str = "webhook.test";
/// Event name sent when a webhook URL is saved.
pub const CONFIGURED_EVENT: &str = "webhook.configured";

/// Build the integrations router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/settings/integrations/webhooks/{target}/test",
        post(test_webhook),
    )
}

/// The configurable outbound webhooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookTarget {
    Specials,
    Shiplogic,
}

impl WebhookTarget {
    pub const ALL: [Self; 2] = [Self::Specials, Self::Shiplogic];

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|target| target.key() == s)
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Specials => "specials",
            Self::Shiplogic => "shiplogic",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Specials => "Specials",
            Self::Shiplogic => "ShipLogic",
        }
    }

    /// The configured URL, if any and not blank.
    #[must_use]
    pub fn url(self, integrations: &IntegrationSettings) -> Option<&str> {
        let raw = match self {
            Self::Specials => integrations.specials_webhook.as_deref(),
            Self::Shiplogic => integrations.shiplogic_webhook.as_deref(),
        };
        non_blank(raw)
    }
}

/// Send a test payload to one webhook and report the delivery status.
///
/// POST /api/settings/integrations/webhooks/{target}/test
///
/// Delivery problems are reported as an info toast, never as an error.
#[instrument(skip(state))]
async fn test_webhook(
    State(state): State<AppState>,
    AppPath(target): AppPath<String>,
) -> Result<Json<ToastResponse>, AppError> {
    let target = WebhookTarget::parse(&target)
        .ok_or_else(|| AppError::NotFound(format!("Unknown webhook: {target}")))?;

    let settings = state.store().get().await;
    let Some(url) = target.url(&settings.integrations) else {
        return Ok(Json(ToastResponse::new(Toast::info(format!(
            "No {} webhook configured",
            target.label()
        )))));
    };

    let payload = WebhookPayload::new(
        TEST_EVENT,
        json!({
            "target": target.key(),
            "brandName": settings.general.brand_name,
        }),
    );
    let status = state.webhooks().deliver(url, &payload).await;

    Ok(Json(
        ToastResponse::new(Toast::info(format!("{} webhook {status}", target.label())))
            .with_data(json!({ "status": status.to_string() })),
    ))
}

/// Ping each webhook whose URL changed to a non-blank value.
///
/// Deliveries run in the background; the save does not wait for them.
pub(crate) fn announce_changed_webhooks(
    state: &AppState,
    before: &IntegrationSettings,
    after: &IntegrationSettings,
) {
    for target in WebhookTarget::ALL {
        let old = target.url(before);
        let Some(url) = target.url(after).filter(|new| Some(*new) != old) else {
            continue;
        };

        tracing::debug!(webhook = target.key(), "Webhook URL changed, sending ping");
        state.webhooks().spawn(
            url.to_owned(),
            WebhookPayload::new(CONFIGURED_EVENT, json!({ "target": target.key() })),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_parse() {
        assert_eq!(WebhookTarget::parse("specials"), Some(WebhookTarget::Specials));
        assert_eq!(WebhookTarget::parse("shiplogic"), Some(WebhookTarget::Shiplogic));
        assert_eq!(WebhookTarget::parse("Specials"), None);
        assert_eq!(WebhookTarget::parse("payfast"), None);
    }

    #[test]
    fn test_blank_url_counts_as_unset() {
        let integrations = IntegrationSettings {
            specials_webhook: Some("   ".to_owned()),
            shiplogic_webhook: Some("https://hooks.example.com/ship".to_owned()),
            ..IntegrationSettings::default()
        };
        assert_eq!(WebhookTarget::Specials.url(&integrations), None);
        assert_eq!(
            WebhookTarget::Shiplogic.url(&integrations),
            Some("https://hooks.example.com/ship")
        );
    }
}
