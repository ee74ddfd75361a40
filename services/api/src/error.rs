//! Custom error types for the API service

use auth::AuthError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use media::MediaError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Custom error type for the API service
///
/// Every variant maps to a fixed status and a user-facing message that never
/// includes internal details.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing, malformed or oversized input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing or invalid session
    #[error("Unauthorized")]
    Unauthorized,

    /// Login failed
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Authenticated but not the owner
    #[error("Forbidden")]
    Forbidden,

    #[error("Not found")]
    NotFound,

    /// Identifier already registered
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error
    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Authentication required".to_string(),
            ),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid credentials".to_string(),
            ),
            ApiError::Forbidden => (
                StatusCode::FORBIDDEN,
                "You are not allowed to modify this image".to_string(),
            ),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Image not found".to_string()),
            ApiError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::InvalidCredentials => ApiError::InvalidCredentials,
            AuthError::Validation(msg) => ApiError::Validation(msg),
            AuthError::Conflict(msg) => ApiError::Conflict(msg),
            other => {
                error!("Authentication failure: {}", other);
                ApiError::Internal
            }
        }
    }
}

impl From<MediaError> for ApiError {
    fn from(error: MediaError) -> Self {
        match error {
            MediaError::Validation(msg) => ApiError::Validation(msg),
            MediaError::NotFound => ApiError::NotFound,
            MediaError::Forbidden => ApiError::Forbidden,
            other => {
                error!("Media failure: {}", other);
                ApiError::Internal
            }
        }
    }
}
