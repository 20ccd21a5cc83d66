//! Bedrock Converse gateway
//!
//! Implements the `ConverseGateway` port over the AWS Bedrock Converse API.
//! Each call is stateless: the full converted conversation is sent every time.

use super::types;
use crate::aws::load_sdk_config;
use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use bridge_application::{ConverseGateway, ConverseRequest, GatewayError};
use bridge_domain::ConverseResponse;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone)]
pub struct BedrockConverseGateway {
    client: Arc<BedrockClient>,
}

impl BedrockConverseGateway {
    pub fn new(client: BedrockClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Create a gateway with a Bedrock Runtime client for `region`.
    pub async fn connect(region: &str, profile: Option<&str>) -> Self {
        let config = load_sdk_config(region, profile).await;
        info!(region, "Bedrock runtime client initialized");
        Self::new(BedrockClient::new(&config))
    }
}

#[async_trait]
impl ConverseGateway for BedrockConverseGateway {
    async fn converse(&self, request: ConverseRequest) -> Result<ConverseResponse, GatewayError> {
        let messages = request
            .messages
            .iter()
            .map(types::convert_message)
            .collect::<Result<Vec<_>, _>>()?;

        let mut call = self
            .client
            .converse()
            .model_id(&request.model_id)
            .set_messages(Some(messages));

        if !request.system.is_empty() {
            call = call.set_system(Some(types::convert_system(&request.system)));
        }

        if let Some(ref tool_config) = request.tool_config {
            call = call.tool_config(types::convert_tool_config(tool_config)?);
        }

        let params = &request.params;
        if let Some(ref inference) = params.inference_config {
            call = call.inference_config(types::convert_inference_config(inference));
        }
        if let Some(ref fields) = params.additional_model_request_fields {
            call = call.additional_model_request_fields(types::json_to_document(&Value::Object(
                fields.clone(),
            )));
        }
        if let Some(ref guardrail) = params.guardrail_config {
            call = call.guardrail_config(types::convert_guardrail_config(guardrail));
        }

        debug!(
            model = %request.model_id,
            messages = request.messages.len(),
            tools = request.tool_config.as_ref().map_or(0, |c| c.tools.len()),
            "Calling Bedrock Converse API"
        );

        let output = call
            .send()
            .await
            .map_err(|e| types::convert_converse_error(&e))?;

        Ok(types::convert_converse_output(&output))
    }
}
