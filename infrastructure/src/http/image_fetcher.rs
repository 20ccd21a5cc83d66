//! Image downloads over HTTP(S) for multimodal messages

use async_trait::async_trait;
use bridge_application::{ImageFetchError, ImageFetcher};
use reqwest::header::USER_AGENT;
use tracing::debug;
use url::Url;

/// Default maximum image body size (20 MB)
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 20 * 1024 * 1024;

pub const DEFAULT_USER_AGENT: &str = concat!("converse-bridge/", env!("CARGO_PKG_VERSION"));

/// [`ImageFetcher`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    client: reqwest::Client,
    user_agent: String,
    max_bytes: u64,
}

impl HttpImageFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }
}

impl Default for HttpImageFetcher {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, ImageFetchError> {
        let request_error = |e: reqwest::Error| ImageFetchError::Request {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let response = self
            .client
            .get(url.clone())
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageFetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Reject early when the server announces an oversized body
        if let Some(length) = response.content_length()
            && length > self.max_bytes
        {
            return Err(ImageFetchError::TooLarge {
                size: length,
                max: self.max_bytes,
            });
        }

        let body = response.bytes().await.map_err(request_error)?;
        let size = body.len() as u64;
        if size > self.max_bytes {
            return Err(ImageFetchError::TooLarge {
                size,
                max: self.max_bytes,
            });
        }

        debug!(url = %url, bytes = size, "Fetched image");
        Ok(body.to_vec())
    }
}
