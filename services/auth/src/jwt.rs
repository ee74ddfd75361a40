//! JWT service for session token generation and validation
//!
//! Sessions are stateless: the token carries the user id, the identifier and
//! an expiry, and is signed with HMAC-SHA256 using a server-held secret.
//! There is no server-side session table, so a token stays valid until it
//! expires.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use uuid::Uuid;

use crate::error::AuthError;

/// Default session lifetime: 7 days
pub const DEFAULT_SESSION_EXPIRY: u64 = 604_800;

/// Shortest accepted signing secret, in bytes
pub const MIN_SECRET_LENGTH: usize = 32;

/// The only algorithm tokens are signed and accepted with
const SESSION_ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Symmetric signing secret
    secret: String,
    /// Session expiration time in seconds (default: 7 days)
    pub session_expiry: u64,
}

impl JwtConfig {
    /// Build a configuration, rejecting secrets that are too short to be safe.
    pub fn new(secret: impl Into<String>, session_expiry: u64) -> Result<Self, AuthError> {
        let secret = secret.into();

        if secret.trim().is_empty() {
            return Err(AuthError::Configuration(
                "JWT secret must not be empty".to_string(),
            ));
        }

        if secret.len() < MIN_SECRET_LENGTH {
            return Err(AuthError::Configuration(format!(
                "JWT secret must be at least {} bytes long",
                MIN_SECRET_LENGTH
            )));
        }

        if session_expiry == 0 {
            return Err(AuthError::Configuration(
                "Session expiry must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            secret,
            session_expiry,
        })
    }

    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: HMAC signing secret, at least 32 bytes (required, no default)
    /// - `JWT_SESSION_EXPIRY`: Session expiry in seconds (default: 604800)
    pub fn from_env() -> Result<Self, AuthError> {
        let secret = std::env::var("JWT_SECRET").map_err(|_| {
            AuthError::Configuration("JWT_SECRET environment variable not set".to_string())
        })?;

        let session_expiry = match std::env::var("JWT_SESSION_EXPIRY") {
            Ok(value) => value.parse().map_err(|_| {
                AuthError::Configuration(format!("Invalid JWT_SESSION_EXPIRY: {}", value))
            })?,
            Err(_) => DEFAULT_SESSION_EXPIRY,
        };

        Self::new(secret, session_expiry)
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("session_expiry", &self.session_expiry)
            .finish()
    }
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    /// User identifier (email or username)
    pub email: String,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

impl Claims {
    /// Expiration time as a timestamp
    pub fn expires_at(&self) -> DateTime<Utc> {
        i64::try_from(self.exp)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// A freshly signed session token together with its claims
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub claims: Claims,
}

impl IssuedSession {
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.claims.expires_at()
    }
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    session_expiry: u64,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        // Pinning the algorithm list rejects tokens whose header asks for
        // anything but HS256.
        let mut validation = Validation::new(SESSION_ALGORITHM);
        validation.validate_exp = true;
        validation.leeway = 0;

        JwtService {
            encoding_key,
            decoding_key,
            validation,
            session_expiry: config.session_expiry,
        }
    }

    /// Sign a new session for a user
    pub fn issue_session(&self, user_id: Uuid, email: &str) -> Result<IssuedSession, AuthError> {
        let now = u64::try_from(Utc::now().timestamp())
            .map_err(|_| AuthError::Configuration("System clock is before 1970".to_string()))?;

        let claims = Claims {
            user_id,
            email: email.to_string(),
            iat: now,
            exp: now + self.session_expiry,
        };

        let token = encode(&Header::new(SESSION_ALGORITHM), &claims, &self.encoding_key)?;

        Ok(IssuedSession { token, claims })
    }

    /// Validate a session token and return its claims
    ///
    /// Any failure (malformed token, bad signature, wrong algorithm,
    /// expiry) is reported as "no session" rather than an error.
    pub fn verify_session(&self, token: &str) -> Option<Claims> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(token_data) => Some(token_data.claims),
            Err(e) => {
                debug!("Rejected session token: {}", e);
                None
            }
        }
    }

    /// Get the session expiry time in seconds
    pub fn session_expiry(&self) -> u64 {
        self.session_expiry
    }
}
