//! Request extractors that reject with an error toast.
//!
//! Use these instead of [`axum::Json`] and [`axum::extract::Path`] in
//! handlers, so a body or path that fails to parse is reported the same way
//! as any other [`AppError`].
//!
//! # Example
//!
//! ```rust,ignore
//! async fn change_role(
//!     AppPath(index): AppPath<usize>,
//!     AppJson(req): AppJson<ChangeRoleRequest>,
//! ) -> Result<Json<ToastResponse>, AppError> {
//!     // ...
//! }
//! ```

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Typed path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
