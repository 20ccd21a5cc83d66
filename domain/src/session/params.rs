//! Request parameters forwarded to the Converse call.
//!
//! Converse splits tuning knobs into three records: `inferenceConfig`,
//! `additionalModelRequestFields` (model-specific, free-form) and
//! `guardrailConfig`. All three are forwarded as-is; for telemetry they are
//! also flattened into one `model_parameters` map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Common inference settings (`inferenceConfig`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InferenceConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stop_sequences: Vec<String>,
}

impl InferenceConfig {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Guardrail to evaluate the request against (`guardrailConfig`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardrailConfig {
    pub guardrail_identifier: String,
    pub guardrail_version: String,
    /// `"enabled"`, `"enabled_full"` or `"disabled"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

/// Everything besides messages, system prompts and tools that shapes a Converse call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConverseParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inference_config: Option<InferenceConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_model_request_fields: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardrail_config: Option<GuardrailConfig>,
}

impl ConverseParams {
    pub fn with_inference_config(mut self, config: InferenceConfig) -> Self {
        self.inference_config = Some(config);
        self
    }

    pub fn with_additional_fields(mut self, fields: Map<String, Value>) -> Self {
        self.additional_model_request_fields = Some(fields);
        self
    }

    pub fn with_guardrail(mut self, config: GuardrailConfig) -> Self {
        self.guardrail_config = Some(config);
        self
    }

    /// Flatten the three records into one map for telemetry.
    ///
    /// Later records win on key collisions: inference config, then additional
    /// model fields, then guardrail config.
    pub fn model_parameters(&self) -> Map<String, Value> {
        let mut merged = Map::new();
        if let Some(config) = &self.inference_config {
            merge_object(&mut merged, serde_json::to_value(config).ok());
        }
        if let Some(fields) = &self.additional_model_request_fields {
            merged.extend(fields.clone());
        }
        if let Some(config) = &self.guardrail_config {
            merge_object(&mut merged, serde_json::to_value(config).ok());
        }
        merged
    }
}

fn merge_object(target: &mut Map<String, Value>, value: Option<Value>) {
    if let Some(Value::Object(map)) = value {
        target.extend(map);
    }
}
