//! Observation updates.
//!
//! Each invocation owns one `generation` observation. The invokers send
//! partial updates to it: inputs and parameters before the call, then either
//! output/usage/metadata or an error level and status message afterwards.
//! Unset fields are left untouched by the backend.

use crate::session::response::TokenUsage;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Observation name used by the chat invoker
pub const CHAT_OBSERVATION: &str = "Bedrock Converse";

/// Observation name used by the tool-use invoker
pub const TOOL_USE_OBSERVATION: &str = "Bedrock Converse Tool Use";

/// Severity attached to an observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObservationLevel {
    Debug,
    Default,
    Warning,
    Error,
}

/// Reference to a managed prompt the messages were rendered from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
}

impl PromptRef {
    pub fn new(name: impl Into<String>, version: Option<u32>) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }
}

/// A partial update to the current observation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_parameters: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<PromptRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<ObservationLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
}

impl ObservationUpdate {
    /// Update sent before the remote call
    pub fn started(
        input: Value,
        model: impl Into<String>,
        model_parameters: Map<String, Value>,
        prompt: Option<PromptRef>,
    ) -> Self {
        Self {
            input: Some(input),
            model: Some(model.into()),
            model_parameters: Some(model_parameters),
            prompt,
            ..Default::default()
        }
    }

    /// Update sent after a successful call
    pub fn completed(output: Value, usage: TokenUsage, metadata: Map<String, Value>) -> Self {
        Self {
            output: Some(output),
            usage: Some(usage),
            metadata: Some(metadata),
            ..Default::default()
        }
    }

    /// Update sent when the call failed
    pub fn failed(status_message: impl Into<String>) -> Self {
        Self {
            level: Some(ObservationLevel::Error),
            status_message: Some(status_message.into()),
            ..Default::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == Some(ObservationLevel::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failed_sets_error_level() {
        let update = ObservationUpdate::failed("boom");
        assert!(update.is_error());
        assert_eq!(update.status_message.as_deref(), Some("boom"));
        assert!(update.output.is_none());
    }

    #[test]
    fn test_unset_fields_are_not_serialized() {
        let update = ObservationUpdate::completed(
            json!("hi"),
            TokenUsage::new(1, 1, 2),
            Map::new(),
        );
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(
            value,
            json!({
                "output": "hi",
                "usage": {"input": 1, "output": 1, "total": 2},
                "metadata": {}
            })
        );
    }

    #[test]
    fn test_level_serializes_uppercase() {
        let value = serde_json::to_value(ObservationLevel::Error).unwrap();
        assert_eq!(value, json!("ERROR"));
    }
}
