//! HTTP surface of the image sharing service
//!
//! Wires the `auth` and `media` services into an axum router. Sessions travel
//! in an HttpOnly `session` cookie; image bytes are served publicly from
//! `/i/:id`.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod session;
pub mod state;

pub use config::{AppConfig, RunMode};
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
