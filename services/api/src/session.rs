//! The `session` cookie that carries the signed token

use auth::IssuedSession;
use axum_extra::extract::cookie::{Cookie, SameSite};
use time::OffsetDateTime;

pub const SESSION_COOKIE: &str = "session";

/// Cookie holding a freshly issued session
///
/// Expires together with the token it carries.
pub fn session_cookie(session: &IssuedSession, secure: bool) -> Cookie<'static> {
    let builder = Cookie::build((SESSION_COOKIE, session.token.clone()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/");

    match i64::try_from(session.claims.exp)
        .ok()
        .and_then(|exp| OffsetDateTime::from_unix_timestamp(exp).ok())
    {
        Some(expires) => builder.expires(expires).build(),
        None => builder.build(),
    }
}

/// Already-expired cookie that overwrites the session cookie
///
/// Added to the jar unconditionally so the browser drops the cookie even when
/// the request did not carry it.
pub fn removal_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .build();
    cookie.make_removal();
    cookie
}
