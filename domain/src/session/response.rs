//! Converse response types.
//!
//! A [`ConverseResponse`] is the SDK-agnostic view of one Converse call: the
//! output message's content blocks, why generation stopped, token usage, and
//! the response envelope kept for telemetry.
//!
//! # Two extraction paths
//!
//! ```text
//! Chat:      first_text()  → Option<&str>        (first block only)
//! Tool use:  tool_calls()  → Vec<ToolCallResult> (only when stop_reason == ToolUse)
//! ```

use crate::tool::call::ToolCallResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single block of the output message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseBlock {
    /// Generated text
    Text { text: String },

    /// A request to invoke a tool.
    ToolUse {
        /// API-assigned ID (e.g. "tooluse_abc123").
        id: String,
        name: String,
        /// Arguments, validated by the API against the tool's input schema.
        input: Value,
    },

    /// Any block kind the bridge does not map (reasoning, guard content, ...).
    Other { kind: String },
}

impl ResponseBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ResponseBlock::Text { text: text.into() }
    }

    pub fn tool_use(id: impl Into<String>, name: impl Into<String>, input: Value) -> Self {
        ResponseBlock::ToolUse {
            id: id.into(),
            name: name.into(),
            input,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBlock::Text { text } => Some(text),
            _ => None,
        }
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    /// The model wants tools invoked
    ToolUse,
    MaxTokens,
    StopSequence,
    GuardrailIntervened,
    ContentFiltered,
    /// Provider-specific stop reason.
    Other(String),
}

impl StopReason {
    pub fn as_str(&self) -> &str {
        match self {
            StopReason::EndTurn => "end_turn",
            StopReason::ToolUse => "tool_use",
            StopReason::MaxTokens => "max_tokens",
            StopReason::StopSequence => "stop_sequence",
            StopReason::GuardrailIntervened => "guardrail_intervened",
            StopReason::ContentFiltered => "content_filtered",
            StopReason::Other(s) => s,
        }
    }
}

/// Token counts in the shape the telemetry backend expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input: u32,
    pub output: u32,
    pub total: u32,
}

impl TokenUsage {
    pub fn new(input: u32, output: u32, total: u32) -> Self {
        Self {
            input,
            output,
            total,
        }
    }
}

/// Result of a single Converse call
#[derive(Debug, Clone, PartialEq)]
pub struct ConverseResponse {
    /// Content blocks of the output message, in order.
    pub content: Vec<ResponseBlock>,
    pub stop_reason: StopReason,
    pub usage: TokenUsage,
    /// Response envelope (request id, latency) forwarded to telemetry metadata.
    pub response_metadata: Value,
}

impl ConverseResponse {
    /// Text of the first content block.
    ///
    /// Returns `None` when the message has no blocks or the first block is not text.
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().and_then(ResponseBlock::as_text)
    }

    /// Tool-use blocks as OpenAI tool calls, indexed in block order.
    ///
    /// Empty unless the model stopped for tool use.
    pub fn tool_calls(&self) -> Vec<ToolCallResult> {
        if self.stop_reason != StopReason::ToolUse {
            return Vec::new();
        }

        let mut calls = Vec::new();
        for block in &self.content {
            if let ResponseBlock::ToolUse { id, name, input } = block {
                calls.push(ToolCallResult::new(calls.len(), id, name, input));
            }
        }
        calls
    }
}
