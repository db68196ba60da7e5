//! Settings page and per-section API.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use backoffice_core::{SectionKind, SectionUpdate, Settings};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::instrument;

use crate::error::AppError;
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;
use crate::store::StoreError;
use crate::toast::{Toast, ToastResponse};

// =============================================================================
// Templates
// =============================================================================

/// One section rendered as a block of pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct SectionView {
    pub key: &'static str,
    pub title: &'static str,
    pub body: String,
}

/// User row for template rendering.
#[derive(Debug, Clone)]
pub struct UserView {
    pub index: usize,
    pub email: String,
    pub role: String,
    pub status: String,
}

/// Settings page template.
#[derive(Template)]
#[template(path = "settings/index.html")]
pub struct SettingsTemplate {
    pub brand_name: String,
    pub primary: String,
    pub accent: String,
    pub dark: bool,
    pub sections: Vec<SectionView>,
    pub users: Vec<UserView>,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

impl SettingsTemplate {
    fn new(settings: &Settings) -> Self {
        let mut shown = settings.clone();
        shown.integrations = settings.integrations.redacted();

        let sections = SectionKind::ALL
            .into_iter()
            .filter(|kind| *kind != SectionKind::Users)
            .map(|kind| SectionView {
                key: kind.key(),
                title: kind.title(),
                body: serde_json::to_string_pretty(&shown.section_json(kind))
                    .unwrap_or_default(),
            })
            .collect();

        let users = settings
            .users
            .iter()
            .enumerate()
            .map(|(index, user)| UserView {
                index,
                email: user.email.to_string(),
                role: user.role.to_string(),
                status: user.status.to_string(),
            })
            .collect();

        Self {
            brand_name: settings.general.brand_name.clone(),
            primary: settings.branding.primary.clone(),
            accent: settings.branding.accent.clone(),
            dark: settings.branding.dark,
            sections,
            users,
            success_message: None,
            error_message: None,
        }
    }
}

/// Build the settings router.
pub fn router() -> Router<AppState> {
    Router::new()
        // Page
        .route("/settings", get(settings_page))
        // API
        .route("/api/settings", get(get_settings))
        .route("/api/settings/{section}", get(get_section).put(put_section))
}

// =============================================================================
// Query Parameters
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct SettingsQueryParams {
    pub success: Option<String>,
    pub error: Option<String>,
}

// =============================================================================
// Settings Page
// =============================================================================

/// Render the settings page.
///
/// GET /settings
#[instrument(skip(state))]
async fn settings_page(
    State(state): State<AppState>,
    Query(params): Query<SettingsQueryParams>,
) -> Result<Response, AppError> {
    let settings = state.store().get().await;

    let success_message = params.success.map(|s| match s.as_str() {
        "saved" => "Settings saved.".to_owned(),
        "reset" => "Settings restored to defaults.".to_owned(),
        "user_invited" => "Invitation sent.".to_owned(),
        _ => s,
    });

    let error_message = params.error.map(|e| match e.as_str() {
        "save_failed" => "Failed to save settings. Please try again.".to_owned(),
        _ => e,
    });

    let template = SettingsTemplate {
        success_message,
        error_message,
        ..SettingsTemplate::new(&settings)
    };

    let html = template
        .render()
        .map_err(|e| AppError::Internal(format!("settings template: {e}")))?;
    Ok(Html(html).into_response())
}

// =============================================================================
// Settings API
// =============================================================================

/// Return every section.
///
/// GET /api/settings
async fn get_settings(State(state): State<AppState>) -> Json<Settings> {
    Json(state.store().get().await)
}

/// GET /api/settings/{section}
async fn get_section(
    State(state): State<AppState>,
    AppPath(section): AppPath<String>,
) -> Result<Json<JsonValue>, AppError> {
    let kind: SectionKind = section
        .parse()
        .map_err(|_| AppError::UnknownSection(section))?;
    Ok(section_response(&state, kind).await)
}

/// PUT /api/settings/{section}
async fn put_section(
    State(state): State<AppState>,
    AppPath(section): AppPath<String>,
    AppJson(body): AppJson<JsonValue>,
) -> Result<Json<ToastResponse>, AppError> {
    save_section(&state, &section, body).await
}

/// Current value of one section.
pub(crate) async fn section_response(state: &AppState, kind: SectionKind) -> Json<JsonValue> {
    Json(state.store().get().await.section_json(kind))
}

/// Replace one section from a request body and report it as a toast.
///
/// Saving integrations also pings every webhook URL that changed.
#[instrument(skip(state, body))]
pub(crate) async fn save_section(
    state: &AppState,
    section: &str,
    body: JsonValue,
) -> Result<Json<ToastResponse>, AppError> {
    let update = SectionUpdate::from_json(section, body).map_err(StoreError::from)?;
    let kind = update.kind();

    let saved = state.store().update(update).await?;

    if kind == SectionKind::Integrations {
        super::integrations::announce_changed_webhooks(
            state,
            &saved.previous.integrations,
            &saved.settings.integrations,
        );
    }

    tracing::info!(section = %kind, revision = saved.revision, "Settings section saved");

    Ok(Json(
        ToastResponse::new(Toast::success(format!("{} settings saved", kind.title())))
            .with_data(saved.settings.section_json(kind)),
    ))
}
