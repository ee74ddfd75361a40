//! In-memory blob store used by tests

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use super::BlobStore;
use crate::{error::BlobError, models::BlobObject};

const URL_PREFIX: &str = "memory://blobs/";

/// Blob store backed by a map, with switchable failure injection
#[derive(Clone, Default)]
pub struct InMemoryBlobStore {
    objects: Arc<RwLock<HashMap<String, BlobObject>>>,
    fail_reads: Arc<AtomicBool>,
    fail_deletes: Arc<AtomicBool>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `get` fail with a storage error
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `delete` fail with a storage error
    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub async fn contains(&self, url: &str) -> bool {
        self.objects.read().await.contains_key(url)
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn urls(&self) -> Vec<String> {
        self.objects.read().await.keys().cloned().collect()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> Result<String, BlobError> {
        let url = format!("{}{}", URL_PREFIX, key);
        let object = BlobObject {
            data,
            content_type: Some(content_type.to_string()),
        };
        self.objects.write().await.insert(url.clone(), object);
        Ok(url)
    }

    async fn get(&self, url: &str) -> Result<BlobObject, BlobError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(BlobError::Storage("injected read failure".to_string()));
        }

        self.objects
            .read()
            .await
            .get(url)
            .cloned()
            .ok_or_else(|| BlobError::NotFound(url.to_string()))
    }

    async fn delete(&self, url: &str) -> Result<(), BlobError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(BlobError::Storage("injected delete failure".to_string()));
        }

        self.objects.write().await.remove(url);
        Ok(())
    }
}
