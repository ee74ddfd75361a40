//! Image models

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Image metadata linking a blob URL to its owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: Uuid,
    /// Public URL of the blob holding the image bytes
    pub url: String,
    /// Original file name as uploaded
    pub filename: String,
    /// Size in bytes
    pub size: i64,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// New image creation payload
#[derive(Debug, Clone)]
pub struct NewImage {
    pub url: String,
    pub filename: String,
    pub size: i64,
    pub user_id: Uuid,
}

/// A file received from a client, not yet stored
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    /// Content type declared by the client
    pub content_type: String,
    pub data: Bytes,
}

/// Bytes read back from a blob store
#[derive(Debug, Clone)]
pub struct BlobObject {
    pub data: Bytes,
    pub content_type: Option<String>,
}
