//! Registration, login, logout and session introspection

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{Value, json};
use tracing::debug;

use auth::{LoginCredentials, RegisterRequest};

use crate::{
    error::ApiError,
    middleware::AuthUser,
    models::user_view,
    session::{removal_cookie, session_cookie},
    state::AppState,
};

/// Register a new account and start a session
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let Json(request) = payload.map_err(invalid_body)?;

    let authenticated = state.auth_service.register(request).await?;
    let kind = state.auth_service.identifier_kind();

    let jar = jar.add(session_cookie(&authenticated.session, state.secure_cookies));
    Ok((
        jar,
        Json(json!({
            "message": "Registration successful",
            "user": user_view(kind, &authenticated.user),
        })),
    ))
}

/// Verify credentials and start a session
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginCredentials>, JsonRejection>,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let Json(credentials) = payload.map_err(invalid_body)?;

    let authenticated = state.auth_service.login(credentials).await?;
    let kind = state.auth_service.identifier_kind();

    let jar = jar.add(session_cookie(&authenticated.session, state.secure_cookies));
    Ok((
        jar,
        Json(json!({
            "message": "Login successful",
            "user": user_view(kind, &authenticated.user),
        })),
    ))
}

/// End the session; succeeds whether or not one existed
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<Value>) {
    (
        jar.add(removal_cookie(state.secure_cookies)),
        Json(json!({ "message": "Logged out" })),
    )
}

/// Current user of a valid session
pub async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    // Token outlived its account
    let account = state
        .auth_service
        .session_user(user.id)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    Ok(Json(json!({
        "user": user_view(state.auth_service.identifier_kind(), &account),
        "expiresAt": user.expires_at,
    })))
}

fn invalid_body(rejection: JsonRejection) -> ApiError {
    debug!("Rejected request body: {}", rejection);
    ApiError::Validation("Invalid request body".to_string())
}
