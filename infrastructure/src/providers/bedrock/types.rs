//! Type conversions between AWS Bedrock SDK and domain types
//!
//! Converts domain requests (messages, tool config, parameters) to Bedrock
//! request shapes, and Bedrock Converse responses and errors back to domain
//! `ConverseResponse` / `GatewayError`.

use aws_sdk_bedrockruntime::error::{DisplayErrorContext, SdkError};
use aws_sdk_bedrockruntime::operation::RequestId;
use aws_sdk_bedrockruntime::operation::converse::{ConverseError, ConverseOutput};
use aws_sdk_bedrockruntime::types as bedrock;
use aws_smithy_types::error::operation::BuildError;
use aws_smithy_types::{Blob, Document};
use bridge_application::GatewayError;
use bridge_domain::{
    ConversationRole, ConverseResponse, GuardrailConfig, ImageFormat, InferenceConfig,
    ResponseBlock, StopReason, SystemPrompt, TargetContent, TargetMessage, TokenUsage, ToolChoice,
    ToolConfig, ToolSpec,
};
use serde_json::{Value, json};

fn build_error(what: &str, e: BuildError) -> GatewayError {
    GatewayError::InvalidRequest(format!("Failed to build {}: {}", what, e))
}

// ─── Domain → Bedrock ────────────────────────────────────────────

pub fn convert_system(system: &[SystemPrompt]) -> Vec<bedrock::SystemContentBlock> {
    system
        .iter()
        .map(|prompt| bedrock::SystemContentBlock::Text(prompt.text.clone()))
        .collect()
}

pub fn convert_image_format(format: ImageFormat) -> bedrock::ImageFormat {
    match format {
        ImageFormat::Png => bedrock::ImageFormat::Png,
        ImageFormat::Jpeg => bedrock::ImageFormat::Jpeg,
        ImageFormat::Gif => bedrock::ImageFormat::Gif,
        ImageFormat::Webp => bedrock::ImageFormat::Webp,
    }
}

pub fn convert_content(content: &TargetContent) -> Result<bedrock::ContentBlock, GatewayError> {
    match content {
        TargetContent::Text(text) => Ok(bedrock::ContentBlock::Text(text.clone())),
        TargetContent::Image { format, bytes } => {
            let image = bedrock::ImageBlock::builder()
                .format(convert_image_format(*format))
                .source(bedrock::ImageSource::Bytes(Blob::new(bytes.clone())))
                .build()
                .map_err(|e| build_error("image block", e))?;
            Ok(bedrock::ContentBlock::Image(image))
        }
    }
}

pub fn convert_message(message: &TargetMessage) -> Result<bedrock::Message, GatewayError> {
    let role = match message.role {
        ConversationRole::User => bedrock::ConversationRole::User,
        ConversationRole::Assistant => bedrock::ConversationRole::Assistant,
    };
    let content = message
        .content
        .iter()
        .map(convert_content)
        .collect::<Result<Vec<_>, _>>()?;

    bedrock::Message::builder()
        .role(role)
        .set_content(Some(content))
        .build()
        .map_err(|e| build_error("message", e))
}

/// Convert a domain ToolSpec to a Bedrock Tool::ToolSpec.
pub fn convert_tool_spec(spec: &ToolSpec) -> Result<bedrock::Tool, GatewayError> {
    let spec = bedrock::ToolSpecification::builder()
        .name(&spec.name)
        .set_description(spec.description.clone())
        .input_schema(bedrock::ToolInputSchema::Json(json_to_document(
            &spec.input_schema,
        )))
        .build()
        .map_err(|e| build_error("tool specification", e))?;
    Ok(bedrock::Tool::ToolSpec(spec))
}

/// `Auto` maps to no directive; Bedrock then lets the model decide.
pub fn convert_tool_choice(choice: &ToolChoice) -> Result<Option<bedrock::ToolChoice>, GatewayError> {
    match choice {
        ToolChoice::Auto => Ok(None),
        ToolChoice::Any => Ok(Some(bedrock::ToolChoice::Any(
            bedrock::AnyToolChoice::builder().build(),
        ))),
        ToolChoice::Named(name) => {
            let specific = bedrock::SpecificToolChoice::builder()
                .name(name)
                .build()
                .map_err(|e| build_error("tool choice", e))?;
            Ok(Some(bedrock::ToolChoice::Tool(specific)))
        }
    }
}

pub fn convert_tool_config(config: &ToolConfig) -> Result<bedrock::ToolConfiguration, GatewayError> {
    let tools = config
        .tools
        .iter()
        .map(convert_tool_spec)
        .collect::<Result<Vec<_>, _>>()?;
    let choice = match &config.tool_choice {
        Some(choice) => convert_tool_choice(choice)?,
        None => None,
    };

    bedrock::ToolConfiguration::builder()
        .set_tools(Some(tools))
        .set_tool_choice(choice)
        .build()
        .map_err(|e| build_error("tool config", e))
}

pub fn convert_inference_config(config: &InferenceConfig) -> bedrock::InferenceConfiguration {
    let stop_sequences = if config.stop_sequences.is_empty() {
        None
    } else {
        Some(config.stop_sequences.clone())
    };

    bedrock::InferenceConfiguration::builder()
        .set_max_tokens(config.max_tokens.and_then(|n| i32::try_from(n).ok()))
        .set_temperature(config.temperature)
        .set_top_p(config.top_p)
        .set_stop_sequences(stop_sequences)
        .build()
}

pub fn convert_guardrail_config(config: &GuardrailConfig) -> bedrock::GuardrailConfiguration {
    bedrock::GuardrailConfiguration::builder()
        .guardrail_identifier(&config.guardrail_identifier)
        .guardrail_version(&config.guardrail_version)
        .set_trace(config.trace.as_deref().map(bedrock::GuardrailTrace::from))
        .build()
}

// ─── Bedrock → Domain ────────────────────────────────────────────

/// Convert Bedrock stop reason to domain StopReason.
pub fn convert_stop_reason(reason: &bedrock::StopReason) -> StopReason {
    match reason {
        bedrock::StopReason::EndTurn => StopReason::EndTurn,
        bedrock::StopReason::ToolUse => StopReason::ToolUse,
        bedrock::StopReason::MaxTokens => StopReason::MaxTokens,
        bedrock::StopReason::StopSequence => StopReason::StopSequence,
        bedrock::StopReason::GuardrailIntervened => StopReason::GuardrailIntervened,
        bedrock::StopReason::ContentFiltered => StopReason::ContentFiltered,
        other => StopReason::Other(other.as_str().to_string()),
    }
}

/// Convert a single Bedrock content block to a domain ResponseBlock.
pub fn convert_content_block(block: &bedrock::ContentBlock) -> ResponseBlock {
    match block {
        bedrock::ContentBlock::Text(text) => ResponseBlock::text(text.clone()),
        bedrock::ContentBlock::ToolUse(tool_use) => ResponseBlock::tool_use(
            tool_use.tool_use_id(),
            tool_use.name(),
            document_to_json(tool_use.input()),
        ),
        other => ResponseBlock::Other {
            kind: content_block_kind(other).to_string(),
        },
    }
}

fn content_block_kind(block: &bedrock::ContentBlock) -> &'static str {
    match block {
        bedrock::ContentBlock::Image(_) => "image",
        bedrock::ContentBlock::Document(_) => "document",
        bedrock::ContentBlock::GuardContent(_) => "guard_content",
        bedrock::ContentBlock::ToolResult(_) => "tool_result",
        _ => "unknown",
    }
}

pub fn convert_usage(usage: Option<&bedrock::TokenUsage>) -> TokenUsage {
    let count = |n: i32| u32::try_from(n).unwrap_or(0);
    usage
        .map(|u| {
            TokenUsage::new(
                count(u.input_tokens()),
                count(u.output_tokens()),
                count(u.total_tokens()),
            )
        })
        .unwrap_or_default()
}

/// Convert a Converse operation output to a domain ConverseResponse.
///
/// The response envelope keeps the request id and server-side latency.
pub fn convert_converse_output(output: &ConverseOutput) -> ConverseResponse {
    let content = match output.output() {
        Some(bedrock::ConverseOutput::Message(message)) => message
            .content()
            .iter()
            .map(convert_content_block)
            .collect(),
        _ => Vec::new(),
    };

    ConverseResponse {
        content,
        stop_reason: convert_stop_reason(output.stop_reason()),
        usage: convert_usage(output.usage()),
        response_metadata: json!({
            "RequestId": output.request_id(),
            "latencyMs": output.metrics().map(|m| m.latency_ms()),
        }),
    }
}

// ─── JSON ↔ Document helpers ─────────────────────────────────────

/// Convert a serde_json::Value to an aws_smithy_types::Document.
pub fn json_to_document(value: &Value) -> Document {
    match value {
        Value::Null => Document::Null,
        Value::Bool(b) => Document::Bool(*b),
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Document::Number(aws_smithy_types::Number::PosInt(u))
            } else if let Some(i) = n.as_i64() {
                Document::Number(aws_smithy_types::Number::NegInt(i))
            } else if let Some(f) = n.as_f64() {
                Document::Number(aws_smithy_types::Number::Float(f))
            } else {
                Document::Null
            }
        }
        Value::String(s) => Document::String(s.clone()),
        Value::Array(arr) => Document::Array(arr.iter().map(json_to_document).collect()),
        Value::Object(map) => Document::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_document(v)))
                .collect(),
        ),
    }
}

/// Convert an aws_smithy_types::Document to a serde_json::Value.
pub fn document_to_json(doc: &Document) -> Value {
    match doc {
        Document::Null => Value::Null,
        Document::Bool(b) => Value::Bool(*b),
        Document::Number(n) => match n {
            aws_smithy_types::Number::PosInt(i) => json!(*i),
            aws_smithy_types::Number::NegInt(i) => json!(*i),
            aws_smithy_types::Number::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
        },
        Document::String(s) => Value::String(s.clone()),
        Document::Array(arr) => Value::Array(arr.iter().map(document_to_json).collect()),
        Document::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), document_to_json(v)))
                .collect(),
        ),
    }
}

// ─── Errors ──────────────────────────────────────────────────────

/// Classify a Converse service error.
pub fn classify_converse_error(err: &ConverseError) -> GatewayError {
    fn detail(message: Option<&str>) -> String {
        message.unwrap_or("no details").to_string()
    }

    match err {
        ConverseError::ThrottlingException(e) => GatewayError::Throttled(detail(e.message())),
        ConverseError::ModelNotReadyException(e) => {
            GatewayError::ModelNotReady(detail(e.message()))
        }
        ConverseError::ModelTimeoutException(e) => {
            GatewayError::ModelTimeout(detail(e.message()))
        }
        ConverseError::ServiceUnavailableException(e) => {
            GatewayError::ServiceUnavailable(detail(e.message()))
        }
        ConverseError::InternalServerException(e) => {
            GatewayError::ServiceUnavailable(detail(e.message()))
        }
        ConverseError::ValidationException(e) => GatewayError::Validation(detail(e.message())),
        ConverseError::AccessDeniedException(e) => {
            GatewayError::AccessDenied(detail(e.message()))
        }
        ConverseError::ResourceNotFoundException(e) => {
            GatewayError::NotFound(detail(e.message()))
        }
        other => GatewayError::Other(format!("{}", DisplayErrorContext(other))),
    }
}

/// Convert a Bedrock SDK error to a GatewayError.
pub fn convert_converse_error<R>(err: &SdkError<ConverseError, R>) -> GatewayError
where
    R: std::fmt::Debug + 'static,
{
    match err {
        SdkError::ServiceError(service_err) => classify_converse_error(service_err.err()),
        SdkError::ConstructionFailure(_) => {
            GatewayError::InvalidRequest(format!("{}", DisplayErrorContext(err)))
        }
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => {
            GatewayError::Connection(format!("{}", DisplayErrorContext(err)))
        }
        other => GatewayError::Other(format!("{}", DisplayErrorContext(other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_bedrockruntime::types::error::{
        AccessDeniedException, ThrottlingException, ValidationException,
    };

    #[test]
    fn test_convert_stop_reason_full_mapping() {
        let cases = [
            (bedrock::StopReason::EndTurn, StopReason::EndTurn),
            (bedrock::StopReason::ToolUse, StopReason::ToolUse),
            (bedrock::StopReason::MaxTokens, StopReason::MaxTokens),
            (bedrock::StopReason::StopSequence, StopReason::StopSequence),
            (
                bedrock::StopReason::GuardrailIntervened,
                StopReason::GuardrailIntervened,
            ),
            (bedrock::StopReason::ContentFiltered, StopReason::ContentFiltered),
        ];
        for (bedrock_reason, expected) in cases {
            assert_eq!(convert_stop_reason(&bedrock_reason), expected);
        }
    }

    #[test]
    fn test_convert_text_content_block() {
        let block = bedrock::ContentBlock::Text("hello".to_string());
        assert_eq!(convert_content_block(&block), ResponseBlock::text("hello"));
    }

    #[test]
    fn test_convert_tool_use_content_block() {
        let block = bedrock::ContentBlock::ToolUse(
            bedrock::ToolUseBlock::builder()
                .tool_use_id("tooluse_1")
                .name("get_weather")
                .input(json_to_document(&json!({"city": "Tokyo"})))
                .build()
                .unwrap(),
        );
        assert_eq!(
            convert_content_block(&block),
            ResponseBlock::tool_use("tooluse_1", "get_weather", json!({"city": "Tokyo"}))
        );
    }

    #[test]
    fn test_json_document_roundtrip() {
        let original = json!({
            "name": "test",
            "count": 42,
            "offset": -7,
            "ratio": 0.5,
            "nested": { "flag": true, "none": null },
            "items": [1, 2, 3]
        });
        let doc = json_to_document(&original);
        let back = document_to_json(&doc);
        assert_eq!(original, back);
    }

    #[test]
    fn test_convert_message_with_image() {
        let message = TargetMessage::new(
            ConversationRole::User,
            vec![
                TargetContent::Text("What is this?".to_string()),
                TargetContent::Image {
                    format: ImageFormat::Jpeg,
                    bytes: vec![0xff, 0xd8, 0xff],
                },
            ],
        );

        let converted = convert_message(&message).unwrap();

        assert_eq!(converted.role(), &bedrock::ConversationRole::User);
        assert_eq!(converted.content().len(), 2);
        let bedrock::ContentBlock::Image(image) = &converted.content()[1] else {
            panic!("expected image block");
        };
        assert_eq!(image.format(), &bedrock::ImageFormat::Jpeg);
        assert!(matches!(
            image.source(),
            Some(bedrock::ImageSource::Bytes(blob)) if blob.clone().into_inner() == vec![0xff, 0xd8, 0xff]
        ));
    }

    #[test]
    fn test_convert_system() {
        let blocks = convert_system(&[SystemPrompt::new("a"), SystemPrompt::new("b")]);
        assert_eq!(
            blocks,
            vec![
                bedrock::SystemContentBlock::Text("a".to_string()),
                bedrock::SystemContentBlock::Text("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_convert_tool_config_with_choices() {
        let spec = ToolSpec {
            name: "get_weather".to_string(),
            description: Some("Weather lookup".to_string()),
            input_schema: json!({"type": "object", "properties": {}}),
        };

        let auto = convert_tool_config(&ToolConfig {
            tools: vec![spec.clone()],
            tool_choice: None,
        })
        .unwrap();
        assert_eq!(auto.tools().len(), 1);
        assert!(auto.tool_choice().is_none());

        let any = convert_tool_config(&ToolConfig {
            tools: vec![spec.clone()],
            tool_choice: Some(ToolChoice::Any),
        })
        .unwrap();
        assert!(matches!(any.tool_choice(), Some(bedrock::ToolChoice::Any(_))));

        let named = convert_tool_config(&ToolConfig {
            tools: vec![spec],
            tool_choice: Some(ToolChoice::Named("get_weather".to_string())),
        })
        .unwrap();
        assert!(matches!(
            named.tool_choice(),
            Some(bedrock::ToolChoice::Tool(t)) if t.name() == "get_weather"
        ));
    }

    #[test]
    fn test_convert_tool_choice_auto_is_none() {
        assert!(convert_tool_choice(&ToolChoice::Auto).unwrap().is_none());
    }

    #[test]
    fn test_convert_inference_config() {
        let config = convert_inference_config(&InferenceConfig {
            max_tokens: Some(512),
            temperature: Some(0.2),
            top_p: None,
            stop_sequences: vec!["END".to_string()],
        });
        assert_eq!(config.max_tokens(), Some(512));
        assert_eq!(config.temperature(), Some(0.2));
        assert_eq!(config.top_p(), None);
        assert_eq!(config.stop_sequences(), ["END".to_string()]);
    }

    #[test]
    fn test_convert_guardrail_config() {
        let config = convert_guardrail_config(&GuardrailConfig {
            guardrail_identifier: "gr-1".to_string(),
            guardrail_version: "DRAFT".to_string(),
            trace: Some("enabled".to_string()),
        });
        assert_eq!(config.guardrail_identifier(), "gr-1");
        assert_eq!(config.guardrail_version(), "DRAFT");
        assert_eq!(config.trace(), &bedrock::GuardrailTrace::Enabled);
    }

    #[test]
    fn test_convert_converse_output() {
        let message = bedrock::Message::builder()
            .role(bedrock::ConversationRole::Assistant)
            .content(bedrock::ContentBlock::Text("Sure.".to_string()))
            .content(bedrock::ContentBlock::ToolUse(
                bedrock::ToolUseBlock::builder()
                    .tool_use_id("tooluse_1")
                    .name("lookup")
                    .input(json_to_document(&json!({"q": "x"})))
                    .build()
                    .unwrap(),
            ))
            .build()
            .unwrap();
        let output = ConverseOutput::builder()
            .output(bedrock::ConverseOutput::Message(message))
            .stop_reason(bedrock::StopReason::ToolUse)
            .usage(
                bedrock::TokenUsage::builder()
                    .input_tokens(10)
                    .output_tokens(5)
                    .total_tokens(15)
                    .build()
                    .unwrap(),
            )
            .metrics(
                bedrock::ConverseMetrics::builder()
                    .latency_ms(321)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();

        let response = convert_converse_output(&output);

        assert_eq!(response.stop_reason, StopReason::ToolUse);
        assert_eq!(response.usage, TokenUsage::new(10, 5, 15));
        assert_eq!(response.first_text(), Some("Sure."));
        assert_eq!(response.tool_calls().len(), 1);
        assert_eq!(response.response_metadata["latencyMs"], 321);
    }

    #[test]
    fn test_classify_service_errors() {
        let throttled = ConverseError::ThrottlingException(
            ThrottlingException::builder().message("Rate exceeded").build(),
        );
        let err = classify_converse_error(&throttled);
        assert_eq!(err, GatewayError::Throttled("Rate exceeded".to_string()));
        assert!(err.is_retryable());

        let validation = ConverseError::ValidationException(
            ValidationException::builder().message("bad schema").build(),
        );
        let err = classify_converse_error(&validation);
        assert_eq!(err, GatewayError::Validation("bad schema".to_string()));
        assert!(!err.is_retryable());

        let denied = ConverseError::AccessDeniedException(AccessDeniedException::builder().build());
        assert_eq!(
            classify_converse_error(&denied),
            GatewayError::AccessDenied("no details".to_string())
        );
    }

    #[test]
    fn test_convert_sdk_transport_errors() {
        let timeout: SdkError<ConverseError, ()> = SdkError::timeout_error("read timed out");
        assert!(matches!(
            convert_converse_error(&timeout),
            GatewayError::Connection(_)
        ));

        let construction: SdkError<ConverseError, ()> =
            SdkError::construction_failure("missing model id");
        assert!(matches!(
            convert_converse_error(&construction),
            GatewayError::InvalidRequest(_)
        ));
    }
}
