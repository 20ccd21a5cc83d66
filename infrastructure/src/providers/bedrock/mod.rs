//! AWS Bedrock Converse API provider
//!
//! Issues single Converse calls through `aws-sdk-bedrockruntime` using the
//! standard AWS credential chain.

mod gateway;
mod types;

pub use gateway::BedrockConverseGateway;
pub use types::{document_to_json, json_to_document};
