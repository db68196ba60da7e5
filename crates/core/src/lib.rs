//! Back-office core - settings types and validation.
//!
//! This crate provides the settings model shared by the admin service and
//! the CLI:
//! - `admin` - Settings store, storage backends and HTTP surface
//! - `cli` - Operator commands for inspecting and editing settings
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP clients. Persistence lives in the admin crate.
//!
//! # Modules
//!
//! - [`types`] - Validated values (emails, colours, URLs) and option enums
//! - [`settings`] - The aggregate record, its sections and user list

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod settings;
pub mod types;

pub use settings::*;
pub use types::*;
