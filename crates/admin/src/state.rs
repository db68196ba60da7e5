//! Application state shared across handlers.

use std::sync::Arc;

use crate::services::WebhookClient;
use crate::store::SettingsStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<SettingsStore>,
    webhooks: WebhookClient,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<SettingsStore>, webhooks: WebhookClient) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store, webhooks }),
        }
    }

    #[must_use]
    pub fn store(&self) -> &SettingsStore {
        &self.inner.store
    }

    #[must_use]
    pub fn webhooks(&self) -> &WebhookClient {
        &self.inner.webhooks
    }
}
