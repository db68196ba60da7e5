//! Backoffice admin library.
//!
//! The settings store, its storage backends and the HTTP surface of the
//! admin console, exposed as a library so the CLI and the integration tests
//! can drive them without starting a server.

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::Router;

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
pub mod store;
pub mod toast;

pub use state::AppState;
pub use store::{Saved, SettingsChange, SettingsStore, StoreError};

/// Build the application router over `state`, without middleware layers.
pub fn app(state: AppState) -> Router {
    routes::routes().with_state(state)
}
