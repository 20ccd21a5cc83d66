//! HTTP adapters.

mod image_fetcher;

pub use image_fetcher::{DEFAULT_MAX_IMAGE_BYTES, DEFAULT_USER_AGENT, HttpImageFetcher};
