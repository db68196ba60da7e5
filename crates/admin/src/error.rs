//! Unified error handling for the settings API.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use backoffice_core::{UserListError, ValidationErrors};
use thiserror::Error;

use crate::storage::StorageError;
use crate::store::StoreError;
use crate::toast::{Toast, ToastResponse};

/// Application-level error type for the settings API.
///
/// Every variant renders as an error toast.
#[derive(Debug, Error)]
pub enum AppError {
    /// Section name outside the known sections.
    #[error("Unknown settings section: {0}")]
    UnknownSection(String),

    /// A form field failed validation.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Settings storage rejected a read or write.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request conflicts with existing data (e.g. duplicate email).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UnknownSection(name) => Self::UnknownSection(name),
            StoreError::Malformed(msg) => Self::BadRequest(msg),
            StoreError::Validation(errors) => Self::Validation(errors),
            StoreError::Users(e) => Self::from(e),
            StoreError::Persistence(e) => Self::Storage(e),
        }
    }
}

impl From<UserListError> for AppError {
    fn from(err: UserListError) -> Self {
        match err {
            UserListError::InvalidEmail(_) => Self::BadRequest(err.to_string()),
            UserListError::Duplicate(_) => Self::Conflict(err.to_string()),
            UserListError::NoSuchUser(_) => Self::NotFound(err.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::UnknownSection(_) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown in the error toast.
    fn toast_message(&self) -> String {
        match self {
            Self::UnknownSection(name) => format!("Unknown settings section: {name}"),
            Self::Validation(errors) => errors.first_message(),
            // Don't expose storage or internal details to clients
            Self::Storage(_) => "Failed to save settings. Please try again.".to_owned(),
            Self::Internal(_) => "Internal server error".to_owned(),
            Self::NotFound(msg) | Self::Conflict(msg) | Self::BadRequest(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Storage(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Settings request error"
            );
        }

        let body = ToastResponse::new(Toast::error(self.toast_message()));
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("no user at position 3".to_string());
        assert_eq!(err.to_string(), "Not found: no user at position 3");

        let err = AppError::UnknownSection("billing".to_string());
        assert_eq!(err.to_string(), "Unknown settings section: billing");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::UnknownSection("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Validation(ValidationErrors::new())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(AppError::Conflict("dup".to_string())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::BadRequest("bad".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Storage(StorageError::Unavailable("full".to_string()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_storage_details_hidden() {
        let err = AppError::Storage(StorageError::Unavailable("disk /dev/sda1 full".to_string()));
        assert!(!err.toast_message().contains("sda1"));
    }

    #[test]
    fn test_store_user_errors_map_like_user_list_errors() {
        assert!(matches!(
            AppError::from(StoreError::Users(UserListError::Duplicate(
                "a@example.com".to_string()
            ))),
            AppError::Conflict(_)
        ));
    }

    #[test]
    fn test_internal_details_hidden() {
        let err = AppError::Internal("template settings/index.html: missing field".to_string());
        assert_eq!(err.toast_message(), "Internal server error");
        assert_eq!(get_status(err), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_user_list_errors_map() {
        assert!(matches!(
            AppError::from(UserListError::Duplicate("a@example.com".to_string())),
            AppError::Conflict(_)
        ));
        assert!(matches!(
            AppError::from(UserListError::NoSuchUser(4)),
            AppError::NotFound(_)
        ));
    }
}
