//! Model provider adapters implementing the `ConverseGateway` port.

pub mod bedrock;

pub use bedrock::BedrockConverseGateway;
