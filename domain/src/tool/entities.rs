//! Tool domain entities

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tool type tag for OpenAI function tools
pub const FUNCTION_TOOL_TYPE: &str = "function";

/// A tool definition in OpenAI format: `{type, function: {name, description, parameters}}`.
///
/// Only `function` tools translate to Converse; other types (e.g.
/// `code_interpreter`) carry no function body and are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub tool_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<FunctionDefinition>,
}

/// The `function` body of an OpenAI tool definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema of the function arguments
    #[serde(default = "empty_object_schema")]
    pub parameters: Value,
}

fn empty_object_schema() -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {},
    })
}

impl ToolDefinition {
    /// Build a `function` tool definition
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
    ) -> Self {
        Self {
            tool_type: FUNCTION_TOOL_TYPE.to_string(),
            function: Some(FunctionDefinition {
                name: name.into(),
                description: Some(description.into()),
                parameters,
            }),
        }
    }

    pub fn is_function(&self) -> bool {
        self.tool_type == FUNCTION_TOOL_TYPE
    }

    /// Convert to a Converse tool spec.
    ///
    /// Returns `None` for non-function tools and for function tools without a body.
    pub fn to_tool_spec(&self) -> Option<ToolSpec> {
        if !self.is_function() {
            return None;
        }
        let function = self.function.as_ref()?;
        Some(ToolSpec {
            name: function.name.clone(),
            description: function.description.clone(),
            input_schema: function.parameters.clone(),
        })
    }
}

/// A Converse tool specification: `{name, description, inputSchema: {json}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: Option<String>,
    pub input_schema: Value,
}

/// How the model may pick tools.
///
/// Parsed from the OpenAI-style string: `"auto"`, `"any"`, or a tool name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ToolChoice {
    /// The model decides (Converse default, sent as no directive)
    #[default]
    Auto,
    /// The model must call at least one tool
    Any,
    /// The model must call the named tool
    Named(String),
}

impl ToolChoice {
    pub fn parse(s: &str) -> Self {
        match s {
            "auto" => ToolChoice::Auto,
            "any" => ToolChoice::Any,
            name => ToolChoice::Named(name.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ToolChoice::Auto => "auto",
            ToolChoice::Any => "any",
            ToolChoice::Named(name) => name,
        }
    }

    /// The explicit directive to send, if any. `Auto` relies on the remote default.
    pub fn directive(&self) -> Option<ToolChoice> {
        match self {
            ToolChoice::Auto => None,
            other => Some(other.clone()),
        }
    }
}

impl From<&str> for ToolChoice {
    fn from(s: &str) -> Self {
        ToolChoice::parse(s)
    }
}

impl std::fmt::Display for ToolChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tool configuration attached to a Converse request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolConfig {
    pub tools: Vec<ToolSpec>,
    pub tool_choice: Option<ToolChoice>,
}

impl ToolConfig {
    /// Build from OpenAI tool definitions, keeping only function tools in order.
    pub fn from_definitions(definitions: &[ToolDefinition], choice: &ToolChoice) -> Self {
        Self {
            tools: definitions
                .iter()
                .filter_map(ToolDefinition::to_tool_spec)
                .collect(),
            tool_choice: choice.directive(),
        }
    }

    pub fn tool_names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|t| t.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn weather_tool() -> ToolDefinition {
        ToolDefinition::function(
            "get_weather",
            "Get the weather for a city",
            json!({
                "type": "object",
                "properties": { "city": { "type": "string" } },
                "required": ["city"]
            }),
        )
    }

    #[test]
    fn test_parse_openai_tool() {
        let def: ToolDefinition = serde_json::from_value(json!({
            "type": "function",
            "function": {
                "name": "lookup",
                "description": "Look something up",
                "parameters": {"type": "object", "properties": {"q": {"type": "string"}}}
            }
        }))
        .unwrap();
        let spec = def.to_tool_spec().unwrap();
        assert_eq!(spec.name, "lookup");
        assert_eq!(spec.description.as_deref(), Some("Look something up"));
        assert_eq!(spec.input_schema["properties"]["q"]["type"], "string");
    }

    #[test]
    fn test_missing_parameters_defaults_to_empty_object() {
        let def: ToolDefinition = serde_json::from_value(json!({
            "type": "function",
            "function": {"name": "ping"}
        }))
        .unwrap();
        let spec = def.to_tool_spec().unwrap();
        assert_eq!(spec.input_schema["type"], "object");
        assert!(spec.description.is_none());
    }

    #[test]
    fn test_only_function_tools_are_converted() {
        let other: ToolDefinition =
            serde_json::from_value(json!({"type": "code_interpreter"})).unwrap();
        let config = ToolConfig::from_definitions(&[weather_tool(), other], &ToolChoice::Auto);
        assert_eq!(config.tools.len(), 1);
        assert_eq!(config.tool_names().collect::<Vec<_>>(), vec!["get_weather"]);
    }

    #[test]
    fn test_tool_choice_parse() {
        assert_eq!(ToolChoice::parse("auto"), ToolChoice::Auto);
        assert_eq!(ToolChoice::parse("any"), ToolChoice::Any);
        assert_eq!(
            ToolChoice::parse("my_tool"),
            ToolChoice::Named("my_tool".to_string())
        );
    }

    #[test]
    fn test_auto_sends_no_directive() {
        let config = ToolConfig::from_definitions(&[weather_tool()], &ToolChoice::Auto);
        assert_eq!(config.tool_choice, None);
    }

    #[test]
    fn test_any_directive() {
        let config = ToolConfig::from_definitions(&[weather_tool()], &ToolChoice::Any);
        assert_eq!(config.tool_choice, Some(ToolChoice::Any));
    }

    #[test]
    fn test_named_directive() {
        let config =
            ToolConfig::from_definitions(&[weather_tool()], &ToolChoice::from("my_tool"));
        assert_eq!(
            config.tool_choice,
            Some(ToolChoice::Named("my_tool".to_string()))
        );
    }
}
