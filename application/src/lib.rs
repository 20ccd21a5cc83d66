//! Application layer for converse-bridge
//!
//! This crate contains the invokers, the message converter and the port
//! definitions. It depends only on the domain layer.

pub mod context;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use context::BridgeContext;
pub use ports::{
    converse_gateway::{ConverseGateway, ConverseRequest, GatewayError},
    image_fetcher::{ImageFetchError, ImageFetcher},
    secret_store::{SecretError, SecretStore},
    telemetry::{NoTelemetry, TelemetryReporter},
};
pub use use_cases::convert_messages::{ConversionError, ConvertedMessages, MessageConverter};
pub use use_cases::converse_chat::{ConverseChatInput, ConverseChatUseCase};
pub use use_cases::converse_tool_use::{ConverseToolUseInput, ConverseToolUseUseCase};
pub use use_cases::shared::{ConverseOutcome, invocation_error_message};
