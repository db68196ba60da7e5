//! Services used by the settings routes.
//!
//! # Services
//!
//! - `webhook` - Outbound webhook delivery (fire-and-forget or awaited)

pub mod webhook;

pub use webhook::{WebhookClient, WebhookPayload, WebhookStatus};
