//! Tool domain module
//!
//! Tool definitions arrive in OpenAI function-calling format and leave as
//! Converse tool specs; tool-use requests come back from Converse and are
//! returned to the caller as OpenAI tool calls.
//!
//! ```text
//! ToolDefinition ──to_tool_spec()──▶ ToolSpec ─┐
//! tool_choice: &str ──parse()──▶ ToolChoice ───┴─▶ ToolConfig ──▶ Converse
//!
//! Converse ──ResponseBlock::ToolUse──▶ ToolCallResult
//! ```

pub mod call;
pub mod entities;
