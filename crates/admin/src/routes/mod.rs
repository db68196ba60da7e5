//! HTTP route handlers for the settings console.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                                            - Health check
//!
//! # Settings
//! GET    /settings                                          - Settings overview page
//! GET    /api/settings                                      - Full settings aggregate
//! GET    /api/settings/{section}                            - One section
//! PUT    /api/settings/{section}                            - Replace one section
//!
//! # Users
//! GET    /api/settings/users                                - List users
//! POST   /api/settings/users                                - Invite a user
//! PUT    /api/settings/users                                - Replace the user list
//! DELETE /api/settings/users/{index}                        - Remove a user
//! POST   /api/settings/users/{index}/role                   - Change a user's role
//! POST   /api/settings/users/{index}/activate               - Mark a user active
//!
//! # Integrations
//! POST   /api/settings/integrations/webhooks/{target}/test  - Send a test webhook
//! ```

use axum::{Router, routing::get};

use crate::state::AppState;

pub mod integrations;
pub mod settings;
pub mod users;

/// Build the complete router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(settings::router())
        .merge(users::router())
        .merge(integrations::router())
}

async fn health() -> &'static str {
    "ok"
}
