//! Domain error types

use thiserror::Error;

/// Validation failures raised while converting chat messages.
///
/// These are raised before any network I/O takes place.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("System message content must be plain text")]
    SystemContentNotText,

    #[error("Missing required 'url' field in image_url")]
    MissingImageUrl,

    #[error("URL cannot be empty")]
    EmptyImageUrl,

    #[error("Invalid URL format: {0}")]
    InvalidImageUrl(String),

    #[error("Image URL has no file extension: {0}")]
    MissingImageExtension(String),

    #[error("Unsupported image format '{format}' in {url}")]
    UnsupportedImageFormat { format: String, url: String },
}

impl ValidationError {
    /// Check if this error concerns an image reference
    pub fn is_image_error(&self) -> bool {
        !matches!(self, ValidationError::SystemContentNotText)
    }
}
