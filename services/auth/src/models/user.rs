//! User model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    /// Email address or username, depending on the configured identifier kind
    pub identifier: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// New user creation payload
#[derive(Debug, Clone)]
pub struct NewUser {
    pub identifier: String,
    pub password_hash: String,
    pub name: Option<String>,
}

/// User login credentials
///
/// The identifier is accepted under `email`, `username` or `identifier`.
/// Missing fields deserialize as empty strings so they surface as
/// validation errors rather than body rejections.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginCredentials {
    #[serde(default, alias = "email", alias = "username")]
    pub identifier: String,
    #[serde(default)]
    pub password: String,
}

/// User registration payload
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default, alias = "email", alias = "username")]
    pub identifier: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}
