//! Converse session domain.
//!
//! - [`params::ConverseParams`]: inference, model-specific and guardrail settings
//! - [`response::ConverseResponse`]: the SDK-agnostic result of one Converse call

pub mod params;
pub mod response;
