//! Image metadata store

use async_trait::async_trait;
use common::error::DatabaseResult;
use uuid::Uuid;

use crate::models::{Image, NewImage};

pub mod image;

#[cfg(any(test, feature = "test-util"))]
pub mod memory;

pub use image::ImageRepository;

/// Persistence for image metadata
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist a new image row
    async fn create(&self, new_image: &NewImage) -> DatabaseResult<Image>;

    /// Get an image by ID
    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Image>>;

    /// All images owned by a user, newest first
    async fn list_by_user(&self, user_id: Uuid) -> DatabaseResult<Vec<Image>>;

    /// Delete an image by ID, returning whether a row was removed
    async fn delete(&self, id: Uuid) -> DatabaseResult<bool>;
}
