//! Authentication service models

pub mod identifier;
pub mod user;

// Re-export for convenience
pub use identifier::IdentifierKind;
pub use user::{LoginCredentials, NewUser, RegisterRequest, User};
