//! Image storage
//!
//! Uploaded images are validated here, then handed to an [`ImageStore`].
//! [`ImageService`] tries its stores in order: the ImgBB host when an API
//! key is configured, then the local uploads directory.

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::ImageFormat;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::core::Config;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Maximum accepted image size (32 MiB, the ImgBB limit)
pub const MAX_IMAGE_SIZE: usize = 32 * 1024 * 1024;

/// Default ImgBB upload endpoint
pub const IMGBB_ENDPOINT: &str = "https://api.imgbb.com/1/upload";

/// Accepted image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Jpeg,
    Png,
    Webp,
    Gif,
}

impl ImageKind {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageKind::Jpeg => "jpg",
            ImageKind::Png => "png",
            ImageKind::Webp => "webp",
            ImageKind::Gif => "gif",
        }
    }

    fn from_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(ImageKind::Jpeg),
            ImageFormat::Png => Some(ImageKind::Png),
            ImageFormat::WebP => Some(ImageKind::Webp),
            ImageFormat::Gif => Some(ImageKind::Gif),
            _ => None,
        }
    }
}

/// Check size, sniff the format from the magic bytes and decode the header
pub fn validate_image(data: &[u8]) -> AppResult<ImageKind> {
    if data.is_empty() {
        return Err(AppError::new(ErrorCode::EmptyFile).for_field("image"));
    }
    if data.len() > MAX_IMAGE_SIZE {
        return Err(AppError::with_message(
            ErrorCode::FileTooLarge,
            format!(
                "File too large ({} bytes). Maximum size is {}MB",
                data.len(),
                MAX_IMAGE_SIZE / 1024 / 1024
            ),
        )
        .for_field("image"));
    }

    let kind = image::guess_format(data)
        .ok()
        .and_then(ImageKind::from_format)
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::UnsupportedFileFormat,
                "Unsupported file format. Only JPEG, PNG, WebP and GIF are allowed",
            )
            .for_field("image")
        })?;

    image::ImageReader::with_format(Cursor::new(data), format_of(kind))
        .into_dimensions()
        .map_err(|e| {
            AppError::with_message(ErrorCode::InvalidImageFile, format!("Invalid image file: {e}"))
                .for_field("image")
        })?;

    Ok(kind)
}

fn format_of(kind: ImageKind) -> ImageFormat {
    match kind {
        ImageKind::Jpeg => ImageFormat::Jpeg,
        ImageKind::Png => ImageFormat::Png,
        ImageKind::Webp => ImageFormat::WebP,
        ImageKind::Gif => ImageFormat::Gif,
    }
}

/// Hex SHA-256 of the content, used as the local file name
fn content_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Image storage errors
#[derive(Debug, Error)]
pub enum ImageStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image host rejected the upload: {0}")]
    Rejected(String),
}

/// Somewhere images can be put, returning a URL the browser can load
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    async fn store(&self, data: &[u8], kind: ImageKind) -> Result<String, ImageStoreError>;
}

/// Files under `DATA_DIR/uploads`, served at `/uploads/*`
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    dir: PathBuf,
    public_base_url: Option<String>,
}

impl LocalImageStore {
    pub fn new(dir: impl Into<PathBuf>, public_base_url: Option<String>) -> Self {
        Self {
            dir: dir.into(),
            public_base_url: public_base_url.map(|u| u.trim_end_matches('/').to_string()),
        }
    }

    fn url_for(&self, filename: &str) -> String {
        match &self.public_base_url {
            Some(base) => format!("{base}/uploads/{filename}"),
            None => format!("/uploads/{filename}"),
        }
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn store(&self, data: &[u8], kind: ImageKind) -> Result<String, ImageStoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        // Content-addressed: the same image uploaded twice is stored once
        let filename = format!("{}.{}", content_hash(data), kind.extension());
        let path = self.dir.join(&filename);
        if !tokio::fs::try_exists(&path).await? {
            tokio::fs::write(&path, data).await?;
        }
        Ok(self.url_for(&filename))
    }
}

#[derive(Debug, Deserialize)]
struct ImgBbResponse {
    #[serde(default)]
    success: bool,
    data: Option<ImgBbData>,
}

#[derive(Debug, Deserialize)]
struct ImgBbData {
    url: String,
}

/// ImgBB image host
#[derive(Clone)]
pub struct ImgBbImageStore {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl std::fmt::Debug for ImgBbImageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImgBbImageStore")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl ImgBbImageStore {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(api_key, IMGBB_ENDPOINT)
    }

    pub fn with_endpoint(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ImageStore for ImgBbImageStore {
    fn name(&self) -> &'static str {
        "imgbb"
    }

    async fn store(&self, data: &[u8], _kind: ImageKind) -> Result<String, ImageStoreError> {
        let encoded = BASE64.encode(data);
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("key", self.api_key.as_str()), ("image", encoded.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body: ImgBbResponse = response.json().await?;
        match body.data {
            Some(data) if body.success && status.is_success() => Ok(data.url),
            _ => Err(ImageStoreError::Rejected(format!("status {status}"))),
        }
    }
}

/// Result of a successful upload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredImage {
    pub url: String,
    pub size: usize,
    pub format: ImageKind,
    /// Which store accepted the image
    pub storage: String,
}

/// Validates images and stores them in the first store that accepts them
#[derive(Clone)]
pub struct ImageService {
    stores: Vec<Arc<dyn ImageStore>>,
}

impl std::fmt::Debug for ImageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.stores.iter().map(|s| s.name()).collect();
        f.debug_struct("ImageService").field("stores", &names).finish()
    }
}

impl ImageService {
    pub fn new(stores: Vec<Arc<dyn ImageStore>>) -> Self {
        Self { stores }
    }

    /// ImgBB first when configured, local storage always last
    pub fn from_config(config: &Config) -> Self {
        let mut stores: Vec<Arc<dyn ImageStore>> = Vec::new();
        if let Some(key) = &config.imgbb_api_key {
            tracing::info!("ImgBB configured for image uploads");
            stores.push(Arc::new(ImgBbImageStore::new(key.clone())));
        } else {
            tracing::info!("ImgBB not configured, using local storage for images");
        }
        stores.push(Arc::new(LocalImageStore::new(
            config.uploads_dir(),
            config.public_base_url.clone(),
        )));
        Self::new(stores)
    }

    /// Validate and store an image
    pub async fn store(&self, data: &[u8]) -> AppResult<StoredImage> {
        let kind = validate_image(data)?;

        for store in &self.stores {
            match store.store(data, kind).await {
                Ok(url) => {
                    tracing::info!(storage = store.name(), size = data.len(), %url, "Image stored");
                    return Ok(StoredImage {
                        url,
                        size: data.len(),
                        format: kind,
                        storage: store.name().to_string(),
                    });
                }
                Err(e) => {
                    tracing::warn!(storage = store.name(), error = %e, "Image store failed, trying next");
                }
            }
        }

        Err(AppError::new(ErrorCode::FileStorageFailed))
    }
}
