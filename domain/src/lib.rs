//! Domain layer for converse-bridge
//!
//! This crate contains the message, tool and response types that flow between
//! an OpenAI-style caller and the Bedrock Converse API. It has no dependencies
//! on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Chat messages
//!
//! Callers speak the OpenAI chat format: a list of `{role, content}` entries
//! where content is either a string or a list of typed parts (`text`,
//! `image_url`). See [`ChatMessage`].
//!
//! ## Target messages
//!
//! Converse wants system prompts separated from the conversation and every
//! turn expressed as content blocks. See [`SystemPrompt`] and [`TargetMessage`].
//!
//! ## Tool use
//!
//! OpenAI function tools map to Bedrock tool specs ([`ToolConfig`]), and
//! tool-use blocks in the response map back to OpenAI tool calls
//! ([`ToolCallResult`]).

pub mod core;
pub mod message;
pub mod session;
pub mod telemetry;
pub mod tool;

// Re-export commonly used types
pub use self::core::{DEFAULT_MODEL_ID, error::ValidationError};
pub use message::{
    chat::{ChatMessage, ContentPart, ImageUrl, MessageContent, Role},
    image::ImageSource,
    target::{ConversationRole, ImageFormat, SystemPrompt, TargetContent, TargetMessage},
};
pub use session::{
    params::{ConverseParams, GuardrailConfig, InferenceConfig},
    response::{ConverseResponse, ResponseBlock, StopReason, TokenUsage},
};
pub use telemetry::observation::{
    CHAT_OBSERVATION, ObservationLevel, ObservationUpdate, PromptRef, TOOL_USE_OBSERVATION,
};
pub use tool::{
    call::{FunctionCall, ToolCallResult},
    entities::{FunctionDefinition, ToolChoice, ToolConfig, ToolDefinition, ToolSpec},
};
