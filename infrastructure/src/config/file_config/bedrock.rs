//! Bedrock configuration from TOML (`[bedrock]` section)

use bridge_domain::DEFAULT_MODEL_ID;
use serde::{Deserialize, Serialize};

pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBedrockConfig {
    /// AWS region for the Bedrock runtime (default: "us-east-1")
    pub region: String,
    /// AWS profile name for credentials (default chain when unset)
    pub profile: Option<String>,
    /// Model or inference profile id used when the command does not name one
    pub model_id: String,
}

impl Default for FileBedrockConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            profile: None,
            model_id: DEFAULT_MODEL_ID.to_string(),
        }
    }
}
