//! Default inference settings from TOML (`[inference]` section)

use super::{ConfigIssue, Severity};
use bridge_domain::InferenceConfig;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInferenceConfig {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub stop_sequences: Vec<String>,
    /// Model-specific request fields (`additionalModelRequestFields`)
    pub additional_fields: Option<Map<String, Value>>,
}

impl FileInferenceConfig {
    /// Convert to the domain type; `None` when nothing is set.
    pub fn to_inference_config(&self) -> Option<InferenceConfig> {
        let config = InferenceConfig {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
            stop_sequences: self.stop_sequences.clone(),
        };
        (!config.is_empty()).then_some(config)
    }

    pub fn to_additional_fields(&self) -> Option<Map<String, Value>> {
        self.additional_fields.clone().filter(|fields| !fields.is_empty())
    }

    pub(super) fn validate(&self, issues: &mut Vec<ConfigIssue>) {
        if self.max_tokens == Some(0) {
            issues.push(ConfigIssue::new(
                Severity::Error,
                "inference.max_tokens",
                "inference.max_tokens must be greater than 0",
            ));
        }
        let ranged = [
            ("inference.temperature", self.temperature),
            ("inference.top_p", self.top_p),
        ];
        for (field, value) in ranged {
            if let Some(v) = value
                && !(0.0..=1.0).contains(&v)
            {
                issues.push(ConfigIssue::new(
                    Severity::Warning,
                    field,
                    format!("{}: {} is outside 0.0..=1.0 and may be rejected", field, v),
                ));
            }
        }
    }
}
