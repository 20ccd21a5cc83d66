//! Chat and Converse message types
//!
//! - [`chat`]: OpenAI-style input messages
//! - [`target`]: Converse-shaped output messages
//! - [`image`]: validation of `image_url` references

pub mod chat;
pub mod image;
pub mod target;
