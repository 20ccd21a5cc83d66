//! Converse Chat use case.
//!
//! Sends an OpenAI-style conversation to a Converse model and returns the
//! text of the first content block of the reply.
//!
//! Flow:
//! 1. Report inputs, model id and flattened model parameters
//! 2. Convert messages ([`MessageConverter`])
//! 3. One guarded Converse call (failures become [`ConverseOutcome::Failed`])
//! 4. Report output, token usage and metadata

use super::convert_messages::{ConversionError, MessageConverter};
use super::shared::{ConverseOutcome, guarded_converse, observation_metadata};
use crate::ports::converse_gateway::{ConverseGateway, ConverseRequest};
use crate::ports::image_fetcher::ImageFetcher;
use crate::ports::telemetry::TelemetryReporter;
use bridge_domain::{
    CHAT_OBSERVATION, ChatMessage, ConverseParams, DEFAULT_MODEL_ID, ObservationUpdate, PromptRef,
};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::warn;

/// Input for the [`ConverseChatUseCase`].
#[derive(Debug, Clone)]
pub struct ConverseChatInput {
    pub messages: Vec<ChatMessage>,
    pub model_id: String,
    /// Managed prompt the messages were rendered from, linked in telemetry.
    pub prompt: Option<PromptRef>,
    /// Caller metadata merged into the observation metadata.
    pub metadata: Map<String, Value>,
    pub params: ConverseParams,
    /// Messages exactly as the caller sent them, recorded as the observation input.
    pub raw_messages: Option<Value>,
}

impl ConverseChatInput {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            model_id: DEFAULT_MODEL_ID.to_string(),
            prompt: None,
            metadata: Map::new(),
            params: ConverseParams::default(),
            raw_messages: None,
        }
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

    fn observation_input(&self) -> Value {
        match &self.raw_messages {
            Some(raw) => raw.clone(),
            None => serde_json::to_value(&self.messages).unwrap_or_default(),
        }
    }
}

/// Use case for a single chat completion over Converse.
pub struct ConverseChatUseCase {
    gateway: Arc<dyn ConverseGateway>,
    converter: MessageConverter,
    telemetry: Arc<dyn TelemetryReporter>,
}

impl Clone for ConverseChatUseCase {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            converter: self.converter.clone(),
            telemetry: self.telemetry.clone(),
        }
    }
}

impl ConverseChatUseCase {
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

    /// Run the chat invocation.
    ///
    /// Conversion errors (invalid image URLs, failed downloads) are returned
    /// as `Err`. Remote call failures are reported and returned as
    /// `Ok(ConverseOutcome::Failed)`.
    pub async fn execute(
        &self,
        input: ConverseChatInput,
    ) -> Result<ConverseOutcome<String>, ConversionError> {
        self.telemetry.update_observation(
            CHAT_OBSERVATION,
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
                self.telemetry
                    .update_observation(CHAT_OBSERVATION, ObservationUpdate::failed(e.to_string()));
                return Err(e);
            }
        };

        let request = ConverseRequest {
            model_id: input.model_id.clone(),
            system: converted.system,
            messages: converted.messages,
            tool_config: None,
            params: input.params,
        };

        let response = match guarded_converse(
            self.gateway.as_ref(),
            self.telemetry.as_ref(),
            CHAT_OBSERVATION,
            request,
        )
        .await
        {
            Ok(response) => response,
            Err(e) => return Ok(ConverseOutcome::Failed(e)),
        };

        let text = response.first_text().map(str::to_string);
        self.telemetry.update_observation(
            CHAT_OBSERVATION,
            ObservationUpdate::completed(
                text.clone().map(Value::String).unwrap_or(Value::Null),
                response.usage,
                observation_metadata(&response, &input.metadata),
            ),
        );

        match text {
            Some(text) => Ok(ConverseOutcome::Completed(text)),
            None => {
                warn!(
                    model = %input.model_id,
                    blocks = response.content.len(),
                    "Converse response has no leading text block"
                );
                Ok(ConverseOutcome::NoContent)
            }
        }
    }
}
