//! Image download configuration from TOML (`[images]` section)

use crate::http::DEFAULT_MAX_IMAGE_BYTES;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileImagesConfig {
    /// `User-Agent` header sent with image requests
    pub user_agent: Option<String>,
    /// Largest accepted image body in bytes
    pub max_bytes: u64,
}

impl Default for FileImagesConfig {
    fn default() -> Self {
        Self {
            user_agent: None,
            max_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }
}
