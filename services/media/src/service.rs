//! Image upload, listing, deletion and public retrieval

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    blob::BlobStore,
    error::MediaError,
    models::{BlobObject, Image, ImageUpload, NewImage},
    policy,
    repositories::ImageStore,
    validation,
};

/// Coordinates the metadata store and the blob store
#[derive(Clone)]
pub struct ImageService {
    images: Arc<dyn ImageStore>,
    blobs: Arc<dyn BlobStore>,
}

impl ImageService {
    pub fn new(images: Arc<dyn ImageStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { images, blobs }
    }

    /// Store an uploaded image for `owner`
    ///
    /// The blob is written before the metadata row, so a failure in between
    /// leaves at worst an orphaned blob, never a row pointing at nothing.
    pub async fn upload(&self, owner: Uuid, upload: ImageUpload) -> Result<Image, MediaError> {
        validation::validate_content_type(&upload.content_type)?;
        validation::validate_size(upload.data.len())?;

        let size = i64::try_from(upload.data.len()).map_err(|_| validation::too_large())?;
        let key = validation::blob_key(owner, Utc::now().timestamp_millis(), &upload.filename);

        let url = self
            .blobs
            .put(&key, upload.data, &upload.content_type)
            .await?;

        let image = self
            .images
            .create(&NewImage {
                url,
                filename: upload.filename,
                size,
                user_id: owner,
            })
            .await?;

        info!("User {} uploaded image {} ({} bytes)", owner, image.id, size);
        Ok(image)
    }

    /// Images owned by `owner`, newest first
    pub async fn list(&self, owner: Uuid) -> Result<Vec<Image>, MediaError> {
        Ok(self.images.list_by_user(owner).await?)
    }

    /// Delete an image on behalf of `requester`
    ///
    /// Blob removal is best effort: a failure is logged and the metadata row
    /// is deleted regardless.
    pub async fn delete(&self, requester: Uuid, id: Uuid) -> Result<(), MediaError> {
        let image = self
            .images
            .find_by_id(id)
            .await?
            .ok_or(MediaError::NotFound)?;

        policy::authorize_owner(requester, &image)?;

        if let Err(e) = self.blobs.delete(&image.url).await {
            warn!("Failed to delete blob for image {}: {}", image.id, e);
        }

        if !self.images.delete(image.id).await? {
            // Removed concurrently by another request
            return Err(MediaError::NotFound);
        }

        info!("User {} deleted image {}", requester, image.id);
        Ok(())
    }

    /// Public lookup of an image and its bytes; no ownership check
    pub async fn fetch(&self, id: Uuid) -> Result<(Image, BlobObject), MediaError> {
        let image = self
            .images
            .find_by_id(id)
            .await?
            .ok_or(MediaError::NotFound)?;

        let object = self.blobs.get(&image.url).await?;
        Ok((image, object))
    }
}
