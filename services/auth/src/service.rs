//! Registration, login and session verification

use common::error::DatabaseError;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    error::AuthError,
    jwt::{Claims, IssuedSession, JwtService},
    models::{IdentifierKind, LoginCredentials, NewUser, RegisterRequest, User},
    password,
    repositories::UserStore,
    validation,
};

/// A user together with the session just issued for them
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub user: User,
    pub session: IssuedSession,
}

/// Credential verification and session issuance
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    jwt_service: JwtService,
    identifier_kind: IdentifierKind,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        jwt_service: JwtService,
        identifier_kind: IdentifierKind,
    ) -> Self {
        password::prime_dummy_hash();

        Self {
            users,
            jwt_service,
            identifier_kind,
        }
    }

    pub fn identifier_kind(&self) -> IdentifierKind {
        self.identifier_kind
    }

    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    /// Register a new account and sign a session for it
    pub async fn register(&self, request: RegisterRequest) -> Result<Authenticated, AuthError> {
        let kind = self.identifier_kind;
        let identifier = kind.normalize(&request.identifier);

        if identifier.is_empty() || request.password.is_empty() {
            return Err(AuthError::Validation(
                kind.missing_credentials_message().to_string(),
            ));
        }

        kind.validate_identifier(&identifier)
            .map_err(AuthError::Validation)?;
        kind.validate_password(&request.password)
            .map_err(AuthError::Validation)?;

        let name = request
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        if let Some(name) = &name {
            validation::validate_display_name(name).map_err(AuthError::Validation)?;
        }

        if self.users.find_by_identifier(&identifier).await?.is_some() {
            return Err(duplicate_identifier(kind));
        }

        let password_hash = password::hash_password(&request.password)?;

        let user = self
            .users
            .create(&NewUser {
                identifier,
                password_hash,
                name,
            })
            .await
            .map_err(|e| match e {
                // Lost a race with a concurrent registration
                DatabaseError::UniqueViolation(_) => duplicate_identifier(kind),
                other => AuthError::Database(other),
            })?;

        info!("Registered user {}", user.id);

        let session = self
            .jwt_service
            .issue_session(user.id, &user.identifier)?;

        Ok(Authenticated { user, session })
    }

    /// Verify credentials and sign a session
    ///
    /// Unknown identifiers and wrong passwords both yield
    /// `AuthError::InvalidCredentials`.
    pub async fn login(&self, credentials: LoginCredentials) -> Result<Authenticated, AuthError> {
        let kind = self.identifier_kind;
        let identifier = kind.normalize(&credentials.identifier);

        if identifier.is_empty() || credentials.password.is_empty() {
            return Err(AuthError::Validation(
                kind.missing_credentials_message().to_string(),
            ));
        }

        let user = match self.users.find_by_identifier(&identifier).await? {
            Some(user) => user,
            None => {
                password::verify_against_dummy(&credentials.password);
                warn!("Login failed: unknown identifier");
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !password::verify_password(&credentials.password, &user.password_hash) {
            warn!("Login failed: wrong password for user {}", user.id);
            return Err(AuthError::InvalidCredentials);
        }

        let session = self
            .jwt_service
            .issue_session(user.id, &user.identifier)?;

        info!("User {} logged in", user.id);
        Ok(Authenticated { user, session })
    }

    /// Decode a session token; `None` means "not logged in"
    pub fn verify_session(&self, token: &str) -> Option<Claims> {
        self.jwt_service.verify_session(token)
    }

    /// Account a verified session belongs to
    pub async fn session_user(&self, user_id: Uuid) -> Result<Option<User>, AuthError> {
        Ok(self.users.find_by_id(user_id).await?)
    }

    /// Whether the credential store answers
    pub async fn store_available(&self) -> bool {
        self.users.ping().await
    }
}

fn duplicate_identifier(kind: IdentifierKind) -> AuthError {
    let message = match kind {
        IdentifierKind::Email => "This email is already registered",
        IdentifierKind::Username => "This username is already taken",
    };
    AuthError::Conflict(message.to_string())
}
