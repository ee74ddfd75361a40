//! In-memory credential store used by tests

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::UserStore;
use crate::models::{NewUser, User};

/// Thread-safe map of users keyed by id
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User> {
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|user| user.identifier == new_user.identifier)
        {
            return Err(DatabaseError::UniqueViolation(
                "users_identifier_key".to_string(),
            ));
        }

        let user = User {
            id: Uuid::new_v4(),
            identifier: new_user.identifier.clone(),
            password_hash: new_user.password_hash.clone(),
            name: new_user.name.clone(),
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_identifier(&self, identifier: &str) -> DatabaseResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|user| user.identifier == identifier)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn ping(&self) -> bool {
        true
    }
}
