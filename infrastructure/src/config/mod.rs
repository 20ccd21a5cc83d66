//! Configuration file loading for converse-bridge
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `CONVERSE_BRIDGE_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./converse-bridge.toml` or `./.converse-bridge.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/converse-bridge/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, DEFAULT_GUARDRAIL_VERSION, DEFAULT_REGION, FileBedrockConfig, FileConfig,
    FileGuardrailConfig, FileImagesConfig, FileInferenceConfig, FileSecretsConfig,
    FileTelemetryConfig, Severity, TelemetrySink,
};
pub use loader::ConfigLoader;
