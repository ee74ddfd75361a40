//! Media library for the imgshare application
//!
//! Image metadata persistence, blob storage, upload validation and the
//! ownership rules that guard mutations.

pub mod blob;
pub mod error;
pub mod models;
pub mod policy;
pub mod repositories;
pub mod service;
pub mod validation;

pub use blob::{BlobStore, S3BlobStore, S3Config};
pub use error::{BlobError, MediaError};
pub use models::{BlobObject, Image, ImageUpload, NewImage};
pub use repositories::{ImageRepository, ImageStore};
pub use service::ImageService;
