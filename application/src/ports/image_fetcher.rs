//! Image fetcher port
//!
//! Downloads the bytes behind a validated image URL.

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// Errors that can occur while downloading an image
#[derive(Error, Debug)]
pub enum ImageFetchError {
    #[error("Request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: u16 },

    #[error("Image too large: {size} bytes (max: {max} bytes)")]
    TooLarge { size: u64, max: u64 },
}

#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Download the image at `url`, returning the raw body
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, ImageFetchError>;
}
