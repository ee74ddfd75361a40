//! In-memory image store used by tests

use async_trait::async_trait;
use chrono::Utc;
use common::error::DatabaseResult;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::ImageStore;
use crate::models::{Image, NewImage};

#[derive(Clone, Default)]
pub struct InMemoryImageStore {
    images: Arc<RwLock<HashMap<Uuid, Image>>>,
}

impl InMemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.images.read().await.len()
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn create(&self, new_image: &NewImage) -> DatabaseResult<Image> {
        let image = Image {
            id: Uuid::new_v4(),
            url: new_image.url.clone(),
            filename: new_image.filename.clone(),
            size: new_image.size,
            user_id: new_image.user_id,
            created_at: Utc::now(),
        };
        self.images.write().await.insert(image.id, image.clone());
        Ok(image)
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Image>> {
        Ok(self.images.read().await.get(&id).cloned())
    }

    async fn list_by_user(&self, user_id: Uuid) -> DatabaseResult<Vec<Image>> {
        let mut images: Vec<Image> = self
            .images
            .read()
            .await
            .values()
            .filter(|image| image.user_id == user_id)
            .cloned()
            .collect();
        images.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(images)
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        Ok(self.images.write().await.remove(&id).is_some())
    }
}
