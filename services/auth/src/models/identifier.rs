//! Credential identifier abstraction
//!
//! Accounts are keyed either by email address or by username. Both flavours
//! share one code path; only normalization and validation rules differ.

use serde::{Deserialize, Serialize};

use crate::validation;

/// Which kind of identifier accounts are registered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierKind {
    #[default]
    Email,
    Username,
}

impl IdentifierKind {
    /// JSON field name used for the identifier in responses
    pub fn field_name(&self) -> &'static str {
        match self {
            IdentifierKind::Email => "email",
            IdentifierKind::Username => "username",
        }
    }

    /// Canonical form stored and looked up in the credential store
    pub fn normalize(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        match self {
            IdentifierKind::Email => trimmed.to_lowercase(),
            IdentifierKind::Username => trimmed.to_string(),
        }
    }

    /// Message returned when either credential field is missing
    pub fn missing_credentials_message(&self) -> &'static str {
        match self {
            IdentifierKind::Email => "Email and password are required",
            IdentifierKind::Username => "Username and password are required",
        }
    }

    /// Registration rules for a normalized identifier
    pub fn validate_identifier(&self, identifier: &str) -> Result<(), String> {
        match self {
            IdentifierKind::Email => validation::validate_email(identifier),
            IdentifierKind::Username => validation::validate_username(identifier),
        }
    }

    /// Registration rules for a password
    pub fn validate_password(&self, password: &str) -> Result<(), String> {
        match self {
            IdentifierKind::Email => validation::validate_password_present(password),
            IdentifierKind::Username => validation::validate_password_length(password),
        }
    }
}
