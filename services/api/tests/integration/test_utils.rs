//! Shared helpers for building the router and crafting requests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use api::{AppState, create_router};
use auth::repositories::memory::InMemoryUserStore;
use auth::{AuthService, IdentifierKind, JwtConfig, JwtService};
use media::ImageService;
use media::blob::memory::InMemoryBlobStore;
use media::repositories::memory::InMemoryImageStore;

pub const TEST_SECRET: &str = "integration-test-secret-of-sufficient-length";
pub const BOUNDARY: &str = "imgshare-test-boundary";

/// Router plus handles on the stores behind it
pub struct TestApp {
    pub router: Router,
    pub users: InMemoryUserStore,
    pub images: InMemoryImageStore,
    pub blobs: InMemoryBlobStore,
    pub jwt: JwtService,
}

impl TestApp {
    pub fn new() -> Self {
        Self::build(IdentifierKind::Email, false)
    }

    pub fn build(kind: IdentifierKind, secure_cookies: bool) -> Self {
        let users = InMemoryUserStore::new();
        let images = InMemoryImageStore::new();
        let blobs = InMemoryBlobStore::new();
        let jwt = JwtService::new(JwtConfig::new(TEST_SECRET, 3600).unwrap());

        let auth_service = AuthService::new(Arc::new(users.clone()), jwt.clone(), kind);
        let image_service = ImageService::new(Arc::new(images.clone()), Arc::new(blobs.clone()));
        let router = create_router(AppState::new(auth_service, image_service, secure_cookies));

        Self {
            router,
            users,
            images,
            blobs,
            jwt,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Register an email account and return its `session=...` cookie pair
    pub async fn register(&self, email: &str, password: &str) -> String {
        let response = self
            .send(json_request(
                "POST",
                "/api/auth/register",
                serde_json::json!({ "email": email, "password": password }),
                None,
            ))
            .await;
        assert!(response.status().is_success());
        session_cookie(&response).expect("registration sets a session cookie")
    }

    /// Upload a small PNG as the cookie's owner and return the image JSON
    pub async fn upload_png(&self, cookie: &str, filename: &str) -> Value {
        let response = self
            .send(multipart_request(
                "/api/images",
                Some(cookie),
                filename,
                Some("image/png"),
                &[0x89, b'P', b'N', b'G', 1, 2, 3],
            ))
            .await;
        assert!(response.status().is_success());
        body_json(response).await["image"].clone()
    }
}

pub fn json_request(method: &str, uri: &str, body: Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    request_without_body("GET", uri, cookie)
}

pub fn request_without_body(method: &str, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// Single-part `multipart/form-data` body carrying a `file` field
pub fn multipart_request(
    uri: &str,
    cookie: Option<&str>,
    filename: &str,
    content_type: Option<&str>,
    data: &[u8],
) -> Request<Body> {
    multipart_request_with_field(uri, cookie, "file", filename, content_type, data)
}

pub fn multipart_request_with_field(
    uri: &str,
    cookie: Option<&str>,
    field: &str,
    filename: &str,
    content_type: Option<&str>,
    data: &[u8],
) -> Request<Body> {
    let mut body = Vec::with_capacity(data.len() + 256);
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    if let Some(content_type) = content_type {
        body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
    }
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        );
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body)).unwrap()
}

/// Raw `Set-Cookie` header, if any
pub fn set_cookie_header(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// `session=<token>` pair suitable for a `Cookie` request header
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    let header = set_cookie_header(response)?;
    let pair = header.split(';').next()?.trim().to_string();
    if pair.starts_with("session=") && pair.len() > "session=".len() {
        Some(pair)
    } else {
        None
    }
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
