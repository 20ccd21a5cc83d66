//! Core domain concepts

pub mod error;

/// Model invoked when the caller does not name one.
pub const DEFAULT_MODEL_ID: &str = "us.amazon.nova-pro-v1:0";
