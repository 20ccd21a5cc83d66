//! Request input loading (messages, tools, metadata)

mod loader;

pub use loader::{InputError, Loaded, parse_metadata, read_messages, read_tools};
