//! Blob object storage
//!
//! Images are stored as opaque objects addressed by a public URL. The
//! metadata store only ever keeps that URL; reads and deletes go back
//! through the store that produced it.

use async_trait::async_trait;
use bytes::Bytes;

use crate::{error::BlobError, models::BlobObject};

pub mod s3;

#[cfg(any(test, feature = "test-util"))]
pub mod memory;

pub use s3::{S3BlobStore, S3Config};

/// External content storage
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `data` under `key` and return the object's public URL
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> Result<String, BlobError>;

    /// Read an object back by the URL returned from [`BlobStore::put`]
    async fn get(&self, url: &str) -> Result<BlobObject, BlobError>;

    /// Remove an object by URL
    async fn delete(&self, url: &str) -> Result<(), BlobError>;
}
