//! Upload validation and blob key construction

use uuid::Uuid;

use crate::error::MediaError;

/// Largest accepted upload: 10 MiB
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Fallback used when a file name sanitizes to nothing
const DEFAULT_FILENAME: &str = "image";

/// Reject anything not declared as an image
pub fn validate_content_type(content_type: &str) -> Result<(), MediaError> {
    if content_type.trim().to_ascii_lowercase().starts_with("image/") {
        Ok(())
    } else {
        Err(MediaError::Validation(
            "Only image files can be uploaded".to_string(),
        ))
    }
}

/// Reject uploads larger than [`MAX_UPLOAD_BYTES`]
pub fn validate_size(size: usize) -> Result<(), MediaError> {
    if size > MAX_UPLOAD_BYTES {
        Err(too_large())
    } else {
        Ok(())
    }
}

pub(crate) fn too_large() -> MediaError {
    MediaError::Validation("File size must be at most 10MB".to_string())
}

/// Make a client-supplied file name safe to embed in an object key
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let sanitized = sanitized.trim_start_matches('.');
    if sanitized.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized.to_string()
    }
}

/// Object key for an upload: unique per user and per millisecond
pub fn blob_key(user_id: Uuid, timestamp_millis: i64, filename: &str) -> String {
    format!(
        "images/{}/{}-{}",
        user_id,
        timestamp_millis,
        sanitize_filename(filename)
    )
}
