//! Value types for store settings.
//!
//! This module provides validated wrappers and closed option sets used by
//! the settings sections.

pub mod color;
pub mod email;
pub mod link;
pub mod options;

pub use color::{HexColor, HexColorError};
pub use email::{Email, EmailError};
pub use link::{UrlError, check_optional_url, non_blank, parse_url};
pub use options::{Currency, Role, SidebarDensity, UserStatus};
