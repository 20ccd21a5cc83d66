//! Infrastructure layer for converse-bridge
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod aws;
pub mod config;
pub mod http;
pub mod logging;
pub mod providers;
pub mod secrets;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigLoader, FileConfig, Severity, TelemetrySink};
pub use http::HttpImageFetcher;
pub use logging::{JsonlTelemetryReporter, TracingTelemetryReporter};
pub use providers::BedrockConverseGateway;
pub use secrets::{AwsSecretStore, DEFAULT_SECRET_NAME};
