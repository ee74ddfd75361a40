//! Session middleware for cookie-authenticated routes

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::{error::ApiError, session::SESSION_COOKIE, state::AppState};

/// Authenticated user information
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    /// Email or username, as stored
    pub identifier: String,
    pub expires_at: DateTime<Utc>,
}

/// Authentication middleware
///
/// Rejects the request with `Unauthorized` unless the `session` cookie holds
/// a valid token; otherwise makes an [`AuthUser`] available to handlers.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let jar = CookieJar::from_headers(req.headers());
    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or(ApiError::Unauthorized)?;

    let claims = state.auth_service.verify_session(&token).ok_or_else(|| {
        debug!("Rejected request to {} with invalid session", req.uri().path());
        ApiError::Unauthorized
    })?;

    let user = AuthUser {
        id: claims.user_id,
        expires_at: claims.expires_at(),
        identifier: claims.email,
    };

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
