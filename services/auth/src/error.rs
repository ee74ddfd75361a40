//! Error type for authentication operations

use common::error::DatabaseError;
use thiserror::Error;

/// Errors raised while registering, logging in or issuing sessions
#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown identifier or wrong password; the two are never distinguished
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing or malformed input
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The identifier is already registered
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}
