//! Converse gateway port
//!
//! Defines the interface for issuing a single Converse call to a model provider.

use async_trait::async_trait;
use bridge_domain::{ConverseParams, ConverseResponse, SystemPrompt, TargetMessage, ToolConfig};
use thiserror::Error;

/// Errors that can occur during a Converse call.
///
/// Variants classify the provider's failure so callers can tell transient
/// causes from terminal ones (see [`GatewayError::is_retryable`]).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Throttled: {0}")]
    Throttled(String),

    #[error("Model not ready: {0}")]
    ModelNotReady(String),

    #[error("Model timeout: {0}")]
    ModelTimeout(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Whether retrying the identical request could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GatewayError::Throttled(_)
                | GatewayError::ModelNotReady(_)
                | GatewayError::ModelTimeout(_)
                | GatewayError::ServiceUnavailable(_)
                | GatewayError::Connection(_)
        )
    }

    /// Short classification label, used in telemetry metadata
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Throttled(_) => "throttled",
            GatewayError::ModelNotReady(_) => "model_not_ready",
            GatewayError::ModelTimeout(_) => "model_timeout",
            GatewayError::ServiceUnavailable(_) => "service_unavailable",
            GatewayError::Validation(_) => "validation",
            GatewayError::AccessDenied(_) => "access_denied",
            GatewayError::NotFound(_) => "not_found",
            GatewayError::InvalidRequest(_) => "invalid_request",
            GatewayError::Connection(_) => "connection",
            GatewayError::Other(_) => "other",
        }
    }
}

/// A fully converted Converse request
#[derive(Debug, Clone, PartialEq)]
pub struct ConverseRequest {
    pub model_id: String,
    pub system: Vec<SystemPrompt>,
    pub messages: Vec<TargetMessage>,
    pub tool_config: Option<ToolConfig>,
    pub params: ConverseParams,
}

/// Gateway for Converse calls
///
/// This port defines how the application layer talks to the model provider.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ConverseGateway: Send + Sync {
    /// Issue one Converse call
    async fn converse(&self, request: ConverseRequest) -> Result<ConverseResponse, GatewayError>;
}
