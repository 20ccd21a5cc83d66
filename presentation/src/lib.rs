//! Presentation layer for converse-bridge
//!
//! This crate contains CLI definitions, request input loading and
//! output formatters.

pub mod cli;
pub mod input;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{ChatArgs, Cli, Command, InvocationArgs, ToolUseArgs};
pub use input::{InputError, Loaded, parse_metadata, read_messages, read_tools};
pub use output::console::{ConsoleFormatter, Rendered};
