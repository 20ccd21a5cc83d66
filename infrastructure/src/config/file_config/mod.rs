//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod bedrock;
mod guardrail;
mod images;
mod inference;
mod secrets;
mod telemetry;

pub use bedrock::{DEFAULT_REGION, FileBedrockConfig};
pub use guardrail::{DEFAULT_GUARDRAIL_VERSION, FileGuardrailConfig};
pub use images::FileImagesConfig;
pub use inference::FileInferenceConfig;
pub use secrets::FileSecretsConfig;
pub use telemetry::{FileTelemetryConfig, TelemetrySink};

use bridge_domain::ConverseParams;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The configuration cannot work as written.
    Error,
    /// The configuration works but may not behave as expected.
    Warning,
}

/// A detected issue in the loaded configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted path of the offending key
    pub field: &'static str,
    pub message: String,
}

impl ConfigIssue {
    pub fn new(severity: Severity, field: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity,
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Bedrock runtime client and default model
    pub bedrock: FileBedrockConfig,
    /// Default inference settings forwarded with every call
    pub inference: FileInferenceConfig,
    /// Guardrail applied to every call
    pub guardrail: FileGuardrailConfig,
    /// Observation telemetry sink
    pub telemetry: FileTelemetryConfig,
    /// Secret fetched at startup
    pub secrets: FileSecretsConfig,
    /// Image download limits
    pub images: FileImagesConfig,
}

impl FileConfig {
    /// Request parameters configured for every call.
    pub fn converse_params(&self) -> ConverseParams {
        ConverseParams {
            inference_config: self.inference.to_inference_config(),
            additional_model_request_fields: self.inference.to_additional_fields(),
            guardrail_config: self.guardrail.to_guardrail_config(),
        }
    }

    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.bedrock.model_id.trim().is_empty() {
            issues.push(ConfigIssue::new(
                Severity::Error,
                "bedrock.model_id",
                "bedrock.model_id cannot be empty",
            ));
        }
        if self.bedrock.region.trim().is_empty() {
            issues.push(ConfigIssue::new(
                Severity::Error,
                "bedrock.region",
                "bedrock.region cannot be empty",
            ));
        }

        self.inference.validate(&mut issues);
        self.guardrail.validate(&mut issues);

        if self.telemetry.sink == TelemetrySink::Jsonl && self.telemetry.jsonl_path.is_none() {
            issues.push(ConfigIssue::new(
                Severity::Warning,
                "telemetry.jsonl_path",
                "telemetry.sink = \"jsonl\" requires telemetry.jsonl_path; observations will be discarded",
            ));
        }

        if self.secrets.enabled && self.secrets.name.trim().is_empty() {
            issues.push(ConfigIssue::new(
                Severity::Error,
                "secrets.name",
                "secrets.name cannot be empty when secrets.enabled = true",
            ));
        }

        if self.images.max_bytes == 0 {
            issues.push(ConfigIssue::new(
                Severity::Error,
                "images.max_bytes",
                "images.max_bytes cannot be 0",
            ));
        }

        issues
    }
}
