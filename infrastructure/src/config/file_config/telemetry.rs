//! Observation telemetry configuration from TOML (`[telemetry]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where observation updates are sent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TelemetrySink {
    /// Emit as `tracing` events
    #[default]
    Tracing,
    /// Append JSON lines to `jsonl_path`
    Jsonl,
    /// Discard
    None,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTelemetryConfig {
    pub sink: TelemetrySink,
    /// Target file for the `jsonl` sink
    pub jsonl_path: Option<PathBuf>,
}
