//! Converse Tool Use use case.
//!
//! Like [`ConverseChatUseCase`](super::converse_chat::ConverseChatUseCase),
//! but also sends OpenAI function tools as a Converse tool configuration and
//! returns the model's tool-use requests as OpenAI tool calls.
//!
//! Tool choice mapping:
//!
//! | input     | directive sent          |
//! |-----------|-------------------------|
//! | `"auto"`  | none (remote default)   |
//! | `"any"`   | `any`                   |
//! | `<name>`  | `tool { name: <name> }` |

use super::convert_messages::{ConversionError, MessageConverter};
use super::shared::{ConverseOutcome, guarded_converse, observation_metadata};
use crate::ports::converse_gateway::{ConverseGateway, ConverseRequest};
use crate::ports::image_fetcher::ImageFetcher;
use crate::ports::telemetry::TelemetryReporter;
use bridge_domain::{
    ChatMessage, ConverseParams, DEFAULT_MODEL_ID, ObservationUpdate, PromptRef,
    TOOL_USE_OBSERVATION, ToolCallResult, ToolChoice, ToolConfig, ToolDefinition,
};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::{debug, warn};

/// Input for the [`ConverseToolUseUseCase`].
#[derive(Debug, Clone)]
pub struct ConverseToolUseInput {
    pub messages: Vec<ChatMessage>,
    /// Tool definitions in OpenAI format; non-function tools are dropped.
    pub tools: Vec<ToolDefinition>,
    pub tool_choice: ToolChoice,
    pub model_id: String,
    pub prompt: Option<PromptRef>,
    pub metadata: Map<String, Value>,
    pub params: ConverseParams,
    /// Messages exactly as the caller sent them, recorded in the observation input.
    pub raw_messages: Option<Value>,
    /// Tool definitions exactly as the caller sent them.
    pub raw_tools: Option<Value>,
}

impl ConverseToolUseInput {
    pub fn new(messages: Vec<ChatMessage>, tools: Vec<ToolDefinition>) -> Self {
        Self {
            messages,
            tools,
            tool_choice: ToolChoice::Auto,
            model_id: DEFAULT_MODEL_ID.to_string(),
            prompt: None,
            metadata: Map::new(),
            params: ConverseParams::default(),
            raw_messages: None,
            raw_tools: None,
        }
    }

    pub fn with_tool_choice(mut self, choice: impl Into<ToolChoice>) -> Self {
        self.tool_choice = choice.into();
        self
    }

    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    pub fn with_prompt(mut self, prompt: PromptRef) -> Self {
        self.prompt = Some(prompt);
        self
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_params(mut self, params: ConverseParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_raw_messages(mut self, raw: Value) -> Self {
        self.raw_messages = Some(raw);
        self
    }

    pub fn with_raw_tools(mut self, raw: Value) -> Self {
        self.raw_tools = Some(raw);
        self
    }

    fn observation_input(&self) -> Value {
        let messages = match &self.raw_messages {
            Some(raw) => raw.clone(),
            None => serde_json::to_value(&self.messages).unwrap_or_default(),
        };
        let tools = match &self.raw_tools {
            Some(raw) => raw.clone(),
            None => serde_json::to_value(&self.tools).unwrap_or_default(),
        };
        json!({
            "messages": messages,
            "tools": tools,
            "tool_choice": self.tool_choice.as_str(),
        })
    }
}

/// Use case for a single tool-use round over Converse.
pub struct ConverseToolUseUseCase {
    gateway: Arc<dyn ConverseGateway>,
    converter: MessageConverter,
    telemetry: Arc<dyn TelemetryReporter>,
}

impl Clone for ConverseToolUseUseCase {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            converter: self.converter.clone(),
            telemetry: self.telemetry.clone(),
        }
    }
}

impl ConverseToolUseUseCase {
    pub fn new(
        gateway: Arc<dyn ConverseGateway>,
        image_fetcher: Arc<dyn ImageFetcher>,
        telemetry: Arc<dyn TelemetryReporter>,
    ) -> Self {
        Self {
            gateway,
            converter: MessageConverter::new(image_fetcher),
            telemetry,
        }
    }

    /// Run the tool-use invocation.
    ///
    /// Returns the requested tool calls in response order; the list is empty
    /// when the model did not stop for tool use.
    pub async fn execute(
        &self,
        input: ConverseToolUseInput,
    ) -> Result<ConverseOutcome<Vec<ToolCallResult>>, ConversionError> {
        self.telemetry.update_observation(
            TOOL_USE_OBSERVATION,
            ObservationUpdate::started(
                input.observation_input(),
                &input.model_id,
                input.params.model_parameters(),
                input.prompt.clone(),
            ),
        );

        let converted = match self.converter.convert(&input.messages).await {
            Ok(converted) => converted,
            Err(e) => {
                self.telemetry.update_observation(
                    TOOL_USE_OBSERVATION,
                    ObservationUpdate::failed(e.to_string()),
                );
                return Err(e);
            }
        };

        let tool_config = ToolConfig::from_definitions(&input.tools, &input.tool_choice);
        debug!(
            tools = tool_config.tools.len(),
            choice = %input.tool_choice,
            "Built tool configuration"
        );
        // Converse rejects an empty tool list
        let tool_config = if tool_config.tools.is_empty() {
            warn!("No function tools to send; invoking without tool configuration");
            None
        } else {
            Some(tool_config)
        };

        let request = ConverseRequest {
            model_id: input.model_id.clone(),
            system: converted.system,
            messages: converted.messages,
            tool_config,
            params: input.params,
        };

        let response = match guarded_converse(
            self.gateway.as_ref(),
            self.telemetry.as_ref(),
            TOOL_USE_OBSERVATION,
            request,
        )
        .await
        {
            Ok(response) => response,
            Err(e) => return Ok(ConverseOutcome::Failed(e)),
        };

        let tool_calls = response.tool_calls();
        debug!(
            stop_reason = response.stop_reason.as_str(),
            tool_calls = tool_calls.len(),
            "Converse tool use completed"
        );

        self.telemetry.update_observation(
            TOOL_USE_OBSERVATION,
            ObservationUpdate::completed(
                serde_json::to_value(&tool_calls).unwrap_or_default(),
                response.usage,
                observation_metadata(&response, &input.metadata),
            ),
        );

        Ok(ConverseOutcome::Completed(tool_calls))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::converse_gateway::GatewayError;
    use crate::use_cases::convert_messages::tests::RecordingFetcher;
    use crate::use_cases::shared::mocks::{MockGateway, RecordingTelemetry, response};
    use bridge_domain::{ConverseResponse, ResponseBlock, StopReason};

    fn weather_tool() -> ToolDefinition {
        ToolDefinition::function(
            "get_weather",
            "Current weather for a city",
            json!({
                "type": "object",
                "properties": {"city": {"type": "string"}},
                "required": ["city"]
            }),
        )
    }

    fn retrieval_tool() -> ToolDefinition {
        serde_json::from_value(json!({"type": "retrieval"})).unwrap()
    }

    fn setup(
        results: Vec<Result<ConverseResponse, GatewayError>>,
    ) -> (ConverseToolUseUseCase, Arc<MockGateway>, Arc<RecordingTelemetry>) {
        let gateway = Arc::new(MockGateway::new(results));
        let telemetry = Arc::new(RecordingTelemetry::default());
        let use_case = ConverseToolUseUseCase::new(
            gateway.clone(),
            Arc::new(RecordingFetcher::new(b"")),
            telemetry.clone(),
        );
        (use_case, gateway, telemetry)
    }

    fn two_tool_response() -> ConverseResponse {
        response(
            vec![
                ResponseBlock::text("I'll look both up."),
                ResponseBlock::tool_use("tooluse_1", "get_weather", json!({"city": "Tokyo"})),
                ResponseBlock::tool_use(
                    "tooluse_2",
                    "get_weather",
                    json!({"city": "Osaka", "units": "metric"}),
                ),
            ],
            StopReason::ToolUse,
        )
    }

    #[tokio::test]
    async fn test_returns_tool_calls_in_block_order() {
        let (use_case, _, _) = setup(vec![Ok(two_tool_response())]);
        let input = ConverseToolUseInput::new(
            vec![ChatMessage::user("Weather in Tokyo and Osaka?")],
            vec![weather_tool()],
        );

        let calls = use_case.execute(input).await.unwrap().into_option().unwrap();

        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].index, 0);
        assert_eq!(calls[0].id, "tooluse_1");
        assert_eq!(calls[0].call_type, "function");
        assert_eq!(calls[0].function.name, "get_weather");
        assert_eq!(
            calls[0].function.arguments,
            serde_json::to_string(&json!({"city": "Tokyo"})).unwrap()
        );
        assert_eq!(calls[1].index, 1);
        assert_eq!(calls[1].id, "tooluse_2");
        assert_eq!(
            calls[1].arguments_json().unwrap(),
            json!({"city": "Osaka", "units": "metric"})
        );
    }

    #[tokio::test]
    async fn test_end_turn_returns_empty_list() {
        let (use_case, _, _) = setup(vec![Ok(response(
            vec![ResponseBlock::text("No tools needed.")],
            StopReason::EndTurn,
        ))]);
        let input =
            ConverseToolUseInput::new(vec![ChatMessage::user("hi")], vec![weather_tool()]);

        let outcome = use_case.execute(input).await.unwrap();

        assert_eq!(outcome, ConverseOutcome::Completed(vec![]));
    }

    #[tokio::test]
    async fn test_only_function_tools_are_sent() {
        let (use_case, gateway, _) = setup(vec![Ok(two_tool_response())]);
        let input = ConverseToolUseInput::new(
            vec![ChatMessage::user("hi")],
            vec![weather_tool(), retrieval_tool()],
        );

        use_case.execute(input).await.unwrap();

        let config = gateway.requests()[0].tool_config.clone().unwrap();
        assert_eq!(config.tool_names().collect::<Vec<_>>(), vec!["get_weather"]);
    }

    #[tokio::test]
    async fn test_tool_choice_directives() {
        for (choice, expected) in [
            ("auto", None),
            ("any", Some(ToolChoice::Any)),
            ("my_tool", Some(ToolChoice::Named("my_tool".to_string()))),
        ] {
            let (use_case, gateway, _) = setup(vec![Ok(two_tool_response())]);
            let input =
                ConverseToolUseInput::new(vec![ChatMessage::user("hi")], vec![weather_tool()])
                    .with_tool_choice(choice);

            use_case.execute(input).await.unwrap();

            let config = gateway.requests()[0].tool_config.clone().unwrap();
            assert_eq!(config.tool_choice, expected, "tool_choice = {choice}");
        }
    }

    #[tokio::test]
    async fn test_no_function_tools_sends_no_tool_config() {
        let (use_case, gateway, _) = setup(vec![Ok(response(
            vec![ResponseBlock::text("ok")],
            StopReason::EndTurn,
        ))]);
        let input =
            ConverseToolUseInput::new(vec![ChatMessage::user("hi")], vec![retrieval_tool()]);

        use_case.execute(input).await.unwrap();

        assert!(gateway.requests()[0].tool_config.is_none());
    }

    #[tokio::test]
    async fn test_gateway_failure_is_reported_not_raised() {
        let (use_case, _, telemetry) = setup(vec![Err(GatewayError::AccessDenied(
            "no model access".to_string(),
        ))]);
        let input =
            ConverseToolUseInput::new(vec![ChatMessage::user("hi")], vec![weather_tool()])
                .with_model_id("m-2");

        let outcome = use_case.execute(input).await.unwrap();

        assert!(outcome.is_failed());
        assert!(!outcome.failure().unwrap().is_retryable());
        let updates = telemetry.updates();
        assert_eq!(updates.len(), 2);
        assert!(updates[1].1.is_error());
        assert_eq!(
            updates[1].1.status_message.as_deref(),
            Some("ERROR: Can't invoke 'm-2'. Reason: Access denied: no model access")
        );
    }

    #[tokio::test]
    async fn test_telemetry_input_and_output() {
        let (use_case, _, telemetry) = setup(vec![Ok(two_tool_response())]);
        let input =
            ConverseToolUseInput::new(vec![ChatMessage::user("hi")], vec![weather_tool()])
                .with_tool_choice("any");

        use_case.execute(input).await.unwrap();

        let updates = telemetry.updates();
        assert_eq!(updates.len(), 2);
        assert!(updates.iter().all(|(name, _)| *name == TOOL_USE_OBSERVATION));

        let started_input = updates[0].1.input.clone().unwrap();
        assert_eq!(started_input["tool_choice"], "any");
        assert_eq!(started_input["tools"][0]["function"]["name"], "get_weather");
        assert_eq!(started_input["messages"][0]["content"], "hi");

        let output = updates[1].1.output.clone().unwrap();
        assert_eq!(output.as_array().unwrap().len(), 2);
        assert_eq!(output[1]["function"]["name"], "get_weather");
        assert_eq!(updates[1].1.usage.unwrap().total, 20);
    }

    #[tokio::test]
    async fn test_telemetry_input_keeps_caller_payload() {
        let (use_case, _, telemetry) = setup(vec![Ok(two_tool_response())]);
        let raw_messages = json!([{
            "role": "user",
            "content": [{"type": "file", "file": {"file_id": "f-1"}}, {"type": "text", "text": "hi"}]
        }]);
        let raw_tools = json!([
            {
                "type": "function",
                "function": {"name": "get_weather", "parameters": {}, "strict": true}
            },
            {"type": "retrieval"}
        ]);
        let input = ConverseToolUseInput::new(
            serde_json::from_value(raw_messages.clone()).unwrap(),
            serde_json::from_value(raw_tools.clone()).unwrap(),
        )
        .with_raw_messages(raw_messages.clone())
        .with_raw_tools(raw_tools.clone());

        use_case.execute(input).await.unwrap();

        let started_input = telemetry.updates()[0].1.input.clone().unwrap();
        assert_eq!(started_input["messages"], raw_messages);
        assert_eq!(started_input["tools"], raw_tools);
        assert_eq!(started_input["tool_choice"], "auto");
    }
}
