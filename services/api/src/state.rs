//! Application state shared across handlers

use auth::AuthService;
use media::ImageService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub image_service: ImageService,
    /// Mark session cookies `Secure`
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(auth_service: AuthService, image_service: ImageService, secure_cookies: bool) -> Self {
        Self {
            auth_service,
            image_service,
            secure_cookies,
        }
    }
}
