//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use studio_types::error::{CopyError, MediaError, RepositoryError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Image/video/analysis provider errors.
    Media(MediaError),
    /// History persistence errors.
    Repository(RepositoryError),
    /// Rejected `copy` request on a prompt-builder session.
    Copy(CopyError),
    /// Unknown prompt-builder session id.
    SessionNotFound,
    /// Validation error.
    Validation(String),
    /// Generic internal error.
    Internal(String),
}

impl From<MediaError> for AppError {
    fn from(e: MediaError) -> Self {
        AppError::Media(e)
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        AppError::Repository(e)
    }
}

impl From<CopyError> for AppError {
    fn from(e: CopyError) -> Self {
        AppError::Copy(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Media(MediaError::NoMedia) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "NO_MEDIA",
                MediaError::NoMedia.to_string(),
            ),
            AppError::Media(MediaError::UnsupportedModel(model)) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                format!("Unsupported model: {model}"),
            ),
            AppError::Media(MediaError::Http(msg)) => (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_UNAVAILABLE",
                msg.clone(),
            ),
            AppError::Media(e) => (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR", e.to_string()),
            AppError::Repository(RepositoryError::NotFound) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Entity not found".to_string(),
            ),
            AppError::Repository(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_ERROR",
                e.to_string(),
            ),
            AppError::Copy(CopyError::Clipboard(e)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CLIPBOARD_ERROR",
                e.to_string(),
            ),
            AppError::Copy(e) => (StatusCode::CONFLICT, "COPY_REJECTED", e.to_string()),
            AppError::SessionNotFound => (
                StatusCode::NOT_FOUND,
                "SESSION_NOT_FOUND",
                "Prompt-builder session not found".to_string(),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
            ),
        };

        let body = json!({
            "data": null,
            "meta": {
                "request_id": "",
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "response_time_ms": 0
            },
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
