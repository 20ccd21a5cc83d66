//! Tool calls returned to the caller in OpenAI format.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::entities::FUNCTION_TOOL_TYPE;

/// A tool call as OpenAI clients expect it:
/// `{index, id, type: "function", function: {name, arguments}}`.
///
/// `arguments` is the JSON-serialized tool input, a string rather than an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallResult {
    pub index: usize,
    pub id: String,
    #[serde(rename = "type")]
    pub call_type: String,
    pub function: FunctionCall,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

impl ToolCallResult {
    pub fn new(index: usize, id: impl Into<String>, name: impl Into<String>, input: &Value) -> Self {
        Self {
            index,
            id: id.into(),
            call_type: FUNCTION_TOOL_TYPE.to_string(),
            function: FunctionCall {
                name: name.into(),
                arguments: input.to_string(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }

    /// Parse `arguments` back into JSON
    pub fn arguments_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.function.arguments)
    }
}
