//! Ownership checks for image mutations

use uuid::Uuid;

use crate::{error::MediaError, models::Image};

/// Only the user who uploaded an image may mutate it
pub fn authorize_owner(requester: Uuid, image: &Image) -> Result<(), MediaError> {
    if image.user_id == requester {
        Ok(())
    } else {
        Err(MediaError::Forbidden)
    }
}
