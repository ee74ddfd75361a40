//! Image upload, listing, deletion and public retrieval

use axum::{
    Extension, Json,
    extract::{
        Multipart, Path, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::{StatusCode, header},
    response::IntoResponse,
};
use bytes::BytesMut;
use serde_json::{Value, json};
use tracing::debug;
use uuid::Uuid;

use media::{
    ImageUpload,
    validation::{self, MAX_UPLOAD_BYTES},
};

use crate::{error::ApiError, middleware::AuthUser, models::ImageView, state::AppState};

/// Request body ceiling for uploads; above [`MAX_UPLOAD_BYTES`] to leave room
/// for multipart framing so oversized files reach the size check.
pub const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 1024 * 1024;

const FILE_FIELD: &str = "file";
const FALLBACK_CONTENT_TYPE: &str = "image/jpeg";
const IMMUTABLE_CACHE: &str = "public, max-age=31536000, immutable";
/// Stops active content (e.g. scripts in SVG) from running on this origin
const IMAGE_CSP: &str = "default-src 'none'; style-src 'unsafe-inline'; sandbox";

/// Images owned by the caller, newest first
pub async fn list_images(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    let images: Vec<ImageView> = state
        .image_service
        .list(user.id)
        .await?
        .into_iter()
        .map(ImageView::from)
        .collect();
    Ok(Json(json!({ "images": images })))
}

/// Accept a multipart upload with a single `file` field
pub async fn upload_image(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, ApiError> {
    let mut multipart = multipart.map_err(|e| {
        debug!("Rejected upload: {}", e);
        ApiError::Validation("Expected a multipart/form-data body".to_string())
    })?;

    let upload = read_file_field(&mut multipart).await?;
    let image = state.image_service.upload(user.id, upload).await?;

    Ok(Json(json!({
        "message": "Image uploaded successfully",
        "image": ImageView::from(image),
    })))
}

/// Stream the `file` field into memory
///
/// The declared content type is checked before any bytes are read, and the
/// size limit is enforced chunk by chunk.
async fn read_file_field(multipart: &mut Multipart) -> Result<ImageUpload, ApiError> {
    while let Some(mut field) = multipart.next_field().await.map_err(malformed_upload)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        validation::validate_content_type(&content_type)?;

        let filename = field.file_name().unwrap_or_default().to_string();

        let mut data = BytesMut::new();
        while let Some(chunk) = field.chunk().await.map_err(malformed_upload)? {
            validation::validate_size(data.len() + chunk.len())?;
            data.extend_from_slice(&chunk);
        }

        return Ok(ImageUpload {
            filename,
            content_type,
            data: data.freeze(),
        });
    }

    Err(ApiError::Validation("File is required".to_string()))
}

fn malformed_upload(error: MultipartError) -> ApiError {
    debug!("Malformed multipart body: {}", error);
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::Validation("File size must be at most 10MB".to_string())
    } else {
        ApiError::Validation("Malformed multipart body".to_string())
    }
}

/// Delete one of the caller's images
pub async fn delete_image(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_image_id(&id)?;
    state.image_service.delete(user.id, id).await?;

    Ok(Json(json!({ "message": "Image deleted successfully" })))
}

/// Public, unauthenticated image bytes
pub async fn serve_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_image_id(&id)?;
    let (image, object) = state.image_service.fetch(id).await?;

    let content_type = object
        .content_type
        .filter(|content_type| !content_type.is_empty())
        .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());

    let headers = [
        (header::CONTENT_TYPE, content_type),
        (header::CACHE_CONTROL, IMMUTABLE_CACHE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", disposition_filename(&image.filename)),
        ),
        (header::X_CONTENT_TYPE_OPTIONS, "nosniff".to_string()),
        (header::CONTENT_SECURITY_POLICY, IMAGE_CSP.to_string()),
    ];

    Ok((headers, object.data))
}

/// Unknown and malformed ids are indistinguishable
fn parse_image_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound)
}

/// Filename safe to place inside a quoted header parameter
fn disposition_filename(filename: &str) -> String {
    let cleaned: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if cleaned.trim().is_empty() {
        "image".to_string()
    } else {
        cleaned
    }
}
