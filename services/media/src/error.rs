//! Error types for media operations

use common::error::DatabaseError;
use thiserror::Error;

/// Errors raised by a blob store
#[derive(Error, Debug)]
pub enum BlobError {
    #[error("Blob not found: {0}")]
    NotFound(String),

    /// The URL does not point into this store
    #[error("URL is not managed by this store: {0}")]
    InvalidUrl(String),

    #[error("Blob storage error: {0}")]
    Storage(String),

    #[error("Blob storage configuration error: {0}")]
    Configuration(String),
}

/// Errors raised by image operations
#[derive(Error, Debug)]
pub enum MediaError {
    /// Missing, malformed or oversized upload
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Image not found")]
    NotFound,

    /// Authenticated, but not the owner of the image
    #[error("Not the owner of this image")]
    Forbidden,

    #[error(transparent)]
    Blob(#[from] BlobError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}
