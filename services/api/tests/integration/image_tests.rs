//! Image integration tests.
//!
//! Tests verify:
//! - Uploads are validated by content type and size
//! - Listing only returns the caller's images
//! - Only owners can delete, and deleted images stop being served
//! - Public retrieval needs no session and is cacheable

use axum::http::{StatusCode, header};
use serde_json::Value;

use media::validation::MAX_UPLOAD_BYTES;

use super::test_utils::{
    TestApp, body_bytes, body_json, get_request, multipart_request,
    multipart_request_with_field, request_without_body,
};

fn image_id(image: &Value) -> String {
    image["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Upload
// =============================================================================

#[tokio::test]
async fn test_upload_requires_session() {
    let app = TestApp::new();

    let response = app
        .send(multipart_request(
            "/api/images",
            None,
            "cat.png",
            Some("image/png"),
            b"png",
        ))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.blobs.len().await, 0);
}

#[tokio::test]
async fn test_upload_stores_image() {
    let app = TestApp::new();
    let cookie = app.register("ada@example.com", "pw").await;

    let response = app
        .send(multipart_request(
            "/api/images",
            Some(&cookie),
            "holiday photo.png",
            Some("image/png"),
            b"not really a png",
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["message"].is_string());
    let image = &body["image"];
    assert_eq!(image["filename"], "holiday photo.png");
    assert_eq!(image["size"], 16);
    assert!(image["createdAt"].is_string());
    assert!(image.get("userId").is_none());

    let url = image["url"].as_str().unwrap();
    assert!(url.contains("/images/"));
    assert!(url.ends_with("-holiday_photo.png"));
    assert!(app.blobs.contains(url).await);
    assert_eq!(app.images.len().await, 1);
}

#[tokio::test]
async fn test_upload_rejects_non_images_regardless_of_size() {
    let app = TestApp::new();
    let cookie = app.register("ada@example.com", "pw").await;

    for size in [1, MAX_UPLOAD_BYTES + 1] {
        let response = app
            .send(multipart_request(
                "/api/images",
                Some(&cookie),
                "notes.txt",
                Some("text/plain"),
                &vec![b'a'; size],
            ))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let response = app
        .send(multipart_request(
            "/api/images",
            Some(&cookie),
            "mystery",
            None,
            b"bytes",
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(app.images.len().await, 0);
    assert_eq!(app.blobs.len().await, 0);
}

#[tokio::test]
async fn test_upload_size_limit_is_inclusive() {
    let app = TestApp::new();
    let cookie = app.register("ada@example.com", "pw").await;

    let response = app
        .send(multipart_request(
            "/api/images",
            Some(&cookie),
            "too-big.jpg",
            Some("image/jpeg"),
            &vec![7u8; MAX_UPLOAD_BYTES + 1],
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "File size must be at most 10MB"
    );
    assert_eq!(app.images.len().await, 0);

    let response = app
        .send(multipart_request(
            "/api/images",
            Some(&cookie),
            "just-right.jpg",
            Some("image/jpeg"),
            &vec![7u8; MAX_UPLOAD_BYTES],
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["image"]["size"],
        MAX_UPLOAD_BYTES as u64
    );
}

#[tokio::test]
async fn test_upload_requires_file_field() {
    let app = TestApp::new();
    let cookie = app.register("ada@example.com", "pw").await;

    let response = app
        .send(multipart_request_with_field(
            "/api/images",
            Some(&cookie),
            "avatar",
            "cat.png",
            Some("image/png"),
            b"png",
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "File is required");

    // Not multipart at all
    let response = app
        .send(request_without_body("POST", "/api/images", Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_listing_is_scoped_to_caller() {
    let app = TestApp::new();
    let alice = app.register("alice@example.com", "pw").await;
    let bob = app.register("bob@example.com", "pw").await;

    let a1 = app.upload_png(&alice, "a1.png").await;
    let a2 = app.upload_png(&alice, "a2.png").await;
    let b1 = app.upload_png(&bob, "b1.png").await;

    let response = app.send(get_request("/api/images", Some(&alice))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await["images"].clone();
    let ids: Vec<String> = listed.as_array().unwrap().iter().map(image_id).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&image_id(&a1)));
    assert!(ids.contains(&image_id(&a2)));

    let response = app.send(get_request("/api/images", Some(&bob))).await;
    let listed = body_json(response).await["images"].clone();
    let ids: Vec<String> = listed.as_array().unwrap().iter().map(image_id).collect();
    assert_eq!(ids, vec![image_id(&b1)]);

    let response = app.send(get_request("/api/images", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Deletion
// =============================================================================

#[tokio::test]
async fn test_delete_requires_session() {
    let app = TestApp::new();
    let owner = app.register("owner@example.com", "pw").await;
    let image = app.upload_png(&owner, "mine.png").await;

    let response = app
        .send(request_without_body(
            "DELETE",
            &format!("/api/images/{}", image_id(&image)),
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.images.len().await, 1);
    assert_eq!(app.blobs.len().await, 1);
}

#[tokio::test]
async fn test_delete_by_non_owner_is_forbidden() {
    let app = TestApp::new();
    let owner = app.register("owner@example.com", "pw").await;
    let intruder = app.register("intruder@example.com", "pw").await;
    let image = app.upload_png(&owner, "mine.png").await;
    let id = image_id(&image);

    let response = app
        .send(request_without_body(
            "DELETE",
            &format!("/api/images/{}", id),
            Some(&intruder),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    assert_eq!(app.images.len().await, 1);
    let response = app.send(get_request(&format!("/i/{}", id), None)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_deleted_image_is_no_longer_served() {
    let app = TestApp::new();
    let owner = app.register("owner@example.com", "pw").await;
    let image = app.upload_png(&owner, "gone.png").await;
    let id = image_id(&image);

    let response = app
        .send(request_without_body(
            "DELETE",
            &format!("/api/images/{}", id),
            Some(&owner),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["message"].is_string());

    let response = app.send(get_request(&format!("/i/{}", id), None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .send(request_without_body(
            "DELETE",
            &format!("/api/images/{}", id),
            Some(&owner),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert_eq!(app.blobs.len().await, 0);
}

#[tokio::test]
async fn test_delete_survives_blob_store_failure() {
    let app = TestApp::new();
    let owner = app.register("owner@example.com", "pw").await;
    let image = app.upload_png(&owner, "sticky.png").await;

    app.blobs.fail_deletes(true);
    let response = app
        .send(request_without_body(
            "DELETE",
            &format!("/api/images/{}", image_id(&image)),
            Some(&owner),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.images.len().await, 0);
    assert_eq!(app.blobs.len().await, 1);
}

#[tokio::test]
async fn test_delete_unknown_or_malformed_id() {
    let app = TestApp::new();
    let cookie = app.register("ada@example.com", "pw").await;

    let response = app
        .send(request_without_body(
            "DELETE",
            &format!("/api/images/{}", uuid::Uuid::new_v4()),
            Some(&cookie),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .send(request_without_body(
            "DELETE",
            "/api/images/not-a-uuid",
            Some(&cookie),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Public retrieval
// =============================================================================

#[tokio::test]
async fn test_public_fetch_without_session() {
    let app = TestApp::new();
    let owner = app.register("owner@example.com", "pw").await;
    let image = app.upload_png(&owner, "cat v2.png").await;

    let response = app
        .send(get_request(&format!("/i/{}", image_id(&image)), None))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(headers[header::CONTENT_TYPE], "image/png");
    assert_eq!(
        headers[header::CACHE_CONTROL],
        "public, max-age=31536000, immutable"
    );
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "inline; filename=\"cat v2.png\""
    );
    assert_eq!(
        headers[header::CONTENT_SECURITY_POLICY],
        "default-src 'none'; style-src 'unsafe-inline'; sandbox"
    );
    assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");

    let bytes = body_bytes(response).await;
    assert_eq!(bytes, vec![0x89, b'P', b'N', b'G', 1, 2, 3]);
}

#[tokio::test]
async fn test_svg_is_served_sandboxed() {
    let app = TestApp::new();
    let owner = app.register("owner@example.com", "pw").await;

    let response = app
        .send(multipart_request(
            "/api/images",
            Some(&owner),
            "drawing.svg",
            Some("image/svg+xml"),
            br#"<svg xmlns="http://www.w3.org/2000/svg"><script>fetch('/api/images')</script></svg>"#,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let image = body_json(response).await["image"].clone();

    let response = app
        .send(get_request(&format!("/i/{}", image_id(&image)), None))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(headers[header::CONTENT_TYPE], "image/svg+xml");
    let csp = headers[header::CONTENT_SECURITY_POLICY].to_str().unwrap();
    assert!(csp.contains("default-src 'none'"));
    assert!(csp.contains("sandbox"));
}

#[tokio::test]
async fn test_public_fetch_unknown_or_malformed_id() {
    let app = TestApp::new();

    let response = app
        .send(get_request(&format!("/i/{}", uuid::Uuid::new_v4()), None))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.send(get_request("/i/garbage", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_public_fetch_blob_failure_is_internal_error() {
    let app = TestApp::new();
    let owner = app.register("owner@example.com", "pw").await;
    let image = app.upload_png(&owner, "cat.png").await;

    app.blobs.fail_reads(true);
    let response = app
        .send(get_request(&format!("/i/{}", image_id(&image)), None))
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "Internal server error");
}
