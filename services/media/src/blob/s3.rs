//! S3-backed blob store

use async_trait::async_trait;
use aws_sdk_s3::{Client, primitives::ByteStream};
use bytes::Bytes;
use tracing::info;

use super::BlobStore;
use crate::{error::BlobError, models::BlobObject};

/// S3 configuration
#[derive(Debug, Clone)]
pub struct S3Config {
    /// Bucket images are written to
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible services such as MinIO
    pub endpoint_url: Option<String>,
    /// Prefix of the public URLs handed out for stored objects
    pub public_base_url: String,
}

impl S3Config {
    /// Create a new S3Config from environment variables
    ///
    /// # Environment Variables
    /// - `S3_BUCKET`: Bucket name (required)
    /// - `S3_REGION`: Region (default: "us-east-1")
    /// - `S3_ENDPOINT_URL`: Custom endpoint for S3-compatible services (optional)
    /// - `S3_PUBLIC_BASE_URL`: Public URL prefix for objects (default: derived
    ///   from the endpoint or the AWS virtual-hosted bucket URL)
    pub fn from_env() -> Result<Self, BlobError> {
        let bucket = std::env::var("S3_BUCKET")
            .map_err(|_| BlobError::Configuration("S3_BUCKET environment variable not set".to_string()))?;
        if bucket.trim().is_empty() {
            return Err(BlobError::Configuration("S3_BUCKET must not be empty".to_string()));
        }

        let region = std::env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".to_string());
        let endpoint_url = std::env::var("S3_ENDPOINT_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let public_base_url = std::env::var("S3_PUBLIC_BASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| default_public_base_url(&bucket, &region, endpoint_url.as_deref()));

        Ok(S3Config {
            bucket,
            region,
            endpoint_url,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }
}

fn default_public_base_url(bucket: &str, region: &str, endpoint_url: Option<&str>) -> String {
    match endpoint_url {
        // Path-style addressing
        Some(endpoint) => format!("{}/{}", endpoint.trim_end_matches('/'), bucket),
        None => format!("https://{}.s3.{}.amazonaws.com", bucket, region),
    }
}

/// Create an S3 client with optional custom endpoint and region.
pub async fn create_s3_client(config: &S3Config) -> Client {
    let region = aws_config::Region::new(config.region.clone());
    let mut config_loader =
        aws_config::defaults(aws_config::BehaviorVersion::latest()).region(region);

    if let Some(endpoint) = &config.endpoint_url {
        config_loader = config_loader.endpoint_url(endpoint);
    }

    let sdk_config = config_loader.load().await;

    // S3-compatible services generally need path-style addressing
    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(config.endpoint_url.is_some())
        .build();

    Client::from_conf(s3_config)
}

/// Blob store writing to a single S3 bucket
#[derive(Clone)]
pub struct S3BlobStore {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl S3BlobStore {
    pub fn new(client: Client, config: &S3Config) -> Self {
        Self {
            client,
            bucket: config.bucket.clone(),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url_for_key(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }

    fn key_for_url<'a>(&self, url: &'a str) -> Result<&'a str, BlobError> {
        key_from_url(&self.public_base_url, url)
    }
}

/// Strip the public prefix from a URL, leaving the object key
fn key_from_url<'a>(public_base_url: &str, url: &'a str) -> Result<&'a str, BlobError> {
    url.strip_prefix(public_base_url)
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|key| !key.is_empty())
        .ok_or_else(|| BlobError::InvalidUrl(url.to_string()))
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> Result<String, BlobError> {
        let size = data.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| BlobError::Storage(e.to_string()))?;

        info!("Stored {} bytes at s3://{}/{}", size, self.bucket, key);
        Ok(self.url_for_key(key))
    }

    async fn get(&self, url: &str) -> Result<BlobObject, BlobError> {
        let key = self.key_for_url(url)?;

        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let is_not_found = e
                    .as_service_error()
                    .map(|se| se.is_no_such_key())
                    .unwrap_or(false);

                if is_not_found {
                    BlobError::NotFound(format!("s3://{}/{}", self.bucket, key))
                } else {
                    BlobError::Storage(e.to_string())
                }
            })?;

        let content_type = response.content_type().map(str::to_string);
        let data = response
            .body
            .collect()
            .await
            .map_err(|e| BlobError::Storage(e.to_string()))?
            .into_bytes();

        Ok(BlobObject { data, content_type })
    }

    async fn delete(&self, url: &str) -> Result<(), BlobError> {
        let key = self.key_for_url(url)?;

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| BlobError::Storage(e.to_string()))?;

        info!("Deleted s3://{}/{}", self.bucket, key);
        Ok(())
    }
}
