//! Integration tests for the back-office settings service.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p backoffice-integration-tests
//! ```
//!
//! Each test starts the admin router on an ephemeral localhost port over the
//! in-memory storage backend and talks to it with `reqwest`, so no database
//! or running server is needed.
//!
//! # Test Categories
//!
//! - `admin_settings` - Section reads, replacements and validation
//! - `admin_users` - User list edits
//! - `admin_webhooks` - Webhook test buttons and save pings

#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use backoffice_admin::services::WebhookClient;
use backoffice_admin::storage::MemorySettingsStorage;
use backoffice_admin::{AppState, SettingsStore};
use reqwest::Client;
use serde_json::Value;
use tokio::net::TcpListener;

/// A running admin server backed by in-memory storage.
pub struct TestApp {
    pub base_url: String,
    pub client: Client,
    pub storage: Arc<MemorySettingsStorage>,
    pub store: Arc<SettingsStore>,
}

impl TestApp {
    /// Start a server over empty storage.
    pub async fn spawn() -> Self {
        Self::spawn_with(MemorySettingsStorage::new()).await
    }

    /// Start a server over the given storage.
    pub async fn spawn_with(storage: MemorySettingsStorage) -> Self {
        let storage = Arc::new(storage);
        let store = Arc::new(SettingsStore::new(storage.clone()));
        let state = AppState::new(
            Arc::clone(&store),
            WebhookClient::new(Duration::from_secs(2)),
        );

        let base_url = serve(backoffice_admin::app(state)).await;

        Self {
            base_url,
            client: Client::new(),
            storage,
            store,
        }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed");
        read_json(resp).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        let resp = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("PUT request failed");
        read_json(resp).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("POST request failed");
        read_json(resp).await
    }

    /// POST a body that is sent as-is with the given content type.
    pub async fn post_raw(&self, path: &str, content_type: &str, body: &str) -> (StatusCode, Value) {
        let resp = self
            .client
            .post(self.url(path))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body.to_owned())
            .send()
            .await
            .expect("POST request failed");
        read_json(resp).await
    }

    pub async fn delete(&self, path: &str) -> (StatusCode, Value) {
        let resp = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("DELETE request failed");
        read_json(resp).await
    }
}

async fn read_json(resp: reqwest::Response) -> (StatusCode, Value) {
    let status =
        StatusCode::from_u16(resp.status().as_u16()).expect("response status out of range");
    let body = resp.json().await.expect("response body is not JSON");
    (status, body)
}

/// Serve `app` on an ephemeral localhost port and return its base URL.
pub async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    format!("http://{addr}")
}

/// Local endpoint that records every webhook posted to it.
pub struct WebhookReceiver {
    pub url: String,
    received: Arc<Mutex<Vec<Value>>>,
}

#[derive(Clone)]
struct ReceiverState {
    received: Arc<Mutex<Vec<Value>>>,
    reply: StatusCode,
}

async fn record(State(state): State<ReceiverState>, Json(body): Json<Value>) -> StatusCode {
    state
        .received
        .lock()
        .expect("receiver lock poisoned")
        .push(body);
    state.reply
}

impl WebhookReceiver {
    /// Start a receiver that answers every delivery with `reply`.
    pub async fn spawn(reply: StatusCode) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route("/hook", post(record))
            .with_state(ReceiverState {
                received: Arc::clone(&received),
                reply,
            });

        let base_url = serve(app).await;
        Self {
            url: format!("{base_url}/hook"),
            received,
        }
    }

    /// Payloads received so far.
    #[must_use]
    pub fn received(&self) -> Vec<Value> {
        self.received.lock().expect("receiver lock poisoned").clone()
    }

    /// Wait until at least `count` payloads have arrived, or give up after
    /// five seconds and return whatever arrived.
    pub async fn wait_for(&self, count: usize) -> Vec<Value> {
        for _ in 0..100 {
            let received = self.received();
            if received.len() >= count {
                return received;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        self.received()
    }
}
