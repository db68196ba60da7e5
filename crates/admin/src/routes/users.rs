//! Console user list API.
//!
//! Each edit applies one [`UserList`] operation to the stored list under the
//! store lock and saves the whole `users` section back.

use axum::{
    Json, Router,
    extract::State,
    routing::{delete, get, post},
};
use backoffice_core::{Role, SectionKind, UserList, UserListError};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::instrument;

use crate::error::AppError;
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;
use crate::toast::{Toast, ToastResponse};

use super::settings::{save_section, section_response};

/// Build the users router.
///
/// `/api/settings/users` is matched ahead of `/api/settings/{section}`, so
/// GET and PUT are routed here and handed to the section handlers.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/settings/users",
            get(list_users).put(replace_users).post(invite_user),
        )
        .route("/api/settings/users/{index}", delete(remove_user))
        .route("/api/settings/users/{index}/role", post(change_role))
        .route("/api/settings/users/{index}/activate", post(activate_user))
}

// =============================================================================
// API Types
// =============================================================================

/// Request to invite a user.
#[derive(Debug, Deserialize)]
pub struct InviteUserRequest {
    pub email: String,
    pub role: Role,
}

/// Request to change a user's role.
#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: Role,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/settings/users
async fn list_users(State(state): State<AppState>) -> Json<JsonValue> {
    section_response(&state, SectionKind::Users).await
}

/// PUT /api/settings/users
async fn replace_users(
    State(state): State<AppState>,
    AppJson(body): AppJson<JsonValue>,
) -> Result<Json<ToastResponse>, AppError> {
    save_section(&state, SectionKind::Users.key(), body).await
}

/// POST /api/settings/users
#[instrument(skip(state))]
async fn invite_user(
    State(state): State<AppState>,
    AppJson(req): AppJson<InviteUserRequest>,
) -> Result<Json<ToastResponse>, AppError> {
    modify_users(&state, |users| {
        let user = users.invite(&req.email, req.role)?;
        Ok(format!("Invited {}", user.email))
    })
    .await
}

/// DELETE /api/settings/users/{index}
#[instrument(skip(state))]
async fn remove_user(
    State(state): State<AppState>,
    AppPath(index): AppPath<usize>,
) -> Result<Json<ToastResponse>, AppError> {
    modify_users(&state, |users| {
        let removed = users.remove(index)?;
        Ok(format!("Removed {}", removed.email))
    })
    .await
}

/// POST /api/settings/users/{index}/role
#[instrument(skip(state))]
async fn change_role(
    State(state): State<AppState>,
    AppPath(index): AppPath<usize>,
    AppJson(req): AppJson<ChangeRoleRequest>,
) -> Result<Json<ToastResponse>, AppError> {
    modify_users(&state, |users| {
        let user = users.set_role(index, req.role)?;
        Ok(format!("{} is now {}", user.email, user.role))
    })
    .await
}

/// POST /api/settings/users/{index}/activate
#[instrument(skip(state))]
async fn activate_user(
    State(state): State<AppState>,
    AppPath(index): AppPath<usize>,
) -> Result<Json<ToastResponse>, AppError> {
    modify_users(&state, |users| {
        let user = users.activate(index)?;
        Ok(format!("{} is active", user.email))
    })
    .await
}

/// Run one edit against the stored list and report it as a toast.
async fn modify_users(
    state: &AppState,
    edit: impl FnOnce(&mut UserList) -> Result<String, UserListError>,
) -> Result<Json<ToastResponse>, AppError> {
    let saved = state.store().modify_users(edit).await?;
    let message = saved.value;
    tracing::info!(%message, revision = saved.revision, "User list updated");

    let data = saved.settings.section_json(SectionKind::Users);
    Ok(Json(ToastResponse::new(Toast::success(message)).with_data(data)))
}
