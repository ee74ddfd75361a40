//! Authentication library for the imgshare application
//!
//! Credential storage, password hashing, input validation and the stateless
//! signed session codec. HTTP concerns (cookies, status codes) live in the
//! `api` service; this crate only deals in users, claims and errors.

pub mod error;
pub mod jwt;
pub mod models;
pub mod password;
pub mod repositories;
pub mod service;
pub mod validation;

pub use error::AuthError;
pub use jwt::{Claims, IssuedSession, JwtConfig, JwtService};
pub use models::{IdentifierKind, LoginCredentials, NewUser, RegisterRequest, User};
pub use repositories::{UserRepository, UserStore};
pub use service::{AuthService, Authenticated};
