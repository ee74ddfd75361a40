//! Credential store

use async_trait::async_trait;
use common::error::DatabaseResult;
use uuid::Uuid;

use crate::models::{NewUser, User};

pub mod user;

#[cfg(any(test, feature = "test-util"))]
pub mod memory;

pub use user::UserRepository;

/// Persistence for user records
///
/// `create` must enforce identifier uniqueness and report a clash as
/// `DatabaseError::UniqueViolation`.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create a new user
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User>;

    /// Find a user by its (normalized) identifier
    async fn find_by_identifier(&self, identifier: &str) -> DatabaseResult<Option<User>>;

    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>>;

    /// Whether the backing store is reachable
    async fn ping(&self) -> bool;
}
