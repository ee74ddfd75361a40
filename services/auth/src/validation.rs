//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

/// Minimum password length when users register with a username
pub const MIN_USERNAME_PASSWORD_LENGTH: usize = 6;

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }

    let length = username.chars().count();

    if length < 3 {
        return Err("Username must be at least 3 characters long".to_string());
    }

    if length > 32 {
        return Err("Username must be at most 32 characters long".to_string());
    }

    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("Failed to compile username regex"));

    if !regex.is_match(username) {
        return Err("Username can only contain letters, numbers, and underscores".to_string());
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate a password for email-based accounts: presence only
pub fn validate_password_present(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.len() > 128 {
        return Err("Password must be at most 128 characters long".to_string());
    }

    Ok(())
}

/// Validate a password for username-based accounts
pub fn validate_password_length(password: &str) -> Result<(), String> {
    validate_password_present(password)?;

    if password.chars().count() < MIN_USERNAME_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {} characters long",
            MIN_USERNAME_PASSWORD_LENGTH
        ));
    }

    Ok(())
}

/// Validate an optional display name
pub fn validate_display_name(name: &str) -> Result<(), String> {
    if name.chars().count() > 100 {
        return Err("Name must be at most 100 characters long".to_string());
    }

    if name.chars().any(char::is_control) {
        return Err("Name must not contain control characters".to_string());
    }

    Ok(())
}
