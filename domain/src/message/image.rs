//! Image reference validation.
//!
//! An `image_url` part must carry an absolute URL (scheme and host) whose
//! last path segment has a recognised image extension. Everything here runs
//! before any bytes are downloaded.

use super::chat::ImageUrl;
use super::target::ImageFormat;
use crate::core::error::ValidationError;
use url::Url;

/// A validated image reference: where to fetch it and how it is encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    pub url: Url,
    pub format: ImageFormat,
}

impl ImageSource {
    /// Validate an `image_url` object.
    ///
    /// Fails on a missing or empty URL, on a URL without scheme or host,
    /// and on a path whose extension is not a supported image format.
    pub fn parse(image_url: &ImageUrl) -> Result<Self, ValidationError> {
        let raw = image_url
            .url
            .as_deref()
            .ok_or(ValidationError::MissingImageUrl)?;
        if raw.is_empty() {
            return Err(ValidationError::EmptyImageUrl);
        }

        let url = Url::parse(raw).map_err(|_| ValidationError::InvalidImageUrl(raw.to_string()))?;
        if url.host_str().is_none_or(str::is_empty) {
            return Err(ValidationError::InvalidImageUrl(raw.to_string()));
        }

        let extension = path_extension(&url)
            .ok_or_else(|| ValidationError::MissingImageExtension(raw.to_string()))?;
        let format = ImageFormat::from_extension(extension).ok_or_else(|| {
            ValidationError::UnsupportedImageFormat {
                format: extension.to_ascii_lowercase(),
                url: raw.to_string(),
            }
        })?;

        Ok(Self { url, format })
    }
}

/// Extension of the last path segment, ignoring query and fragment.
fn path_extension(url: &Url) -> Option<&str> {
    let segment = url.path().rsplit('/').next()?;
    let (_, ext) = segment.rsplit_once('.')?;
    (!ext.is_empty()).then_some(ext)
}
