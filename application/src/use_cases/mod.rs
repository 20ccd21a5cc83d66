//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod convert_messages;
pub mod converse_chat;
pub mod converse_tool_use;
pub mod shared;
