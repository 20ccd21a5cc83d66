//! Shared utilities for use cases.
//!
//! Contains the invocation outcome type plus the guarded gateway call and
//! telemetry helpers used by both the chat and the tool-use invoker.

use crate::ports::converse_gateway::{ConverseGateway, ConverseRequest, GatewayError};
use crate::ports::telemetry::TelemetryReporter;
use bridge_domain::{ConverseResponse, ObservationUpdate};
use serde_json::{Map, Value};
use tracing::{debug, error};

/// Result of an invocation whose remote call is guarded.
///
/// A failed remote call does not surface as `Err`: it has already been
/// reported to telemetry and the diagnostic log, and is handed back as
/// [`ConverseOutcome::Failed`] so callers can inspect the cause.
#[derive(Debug, Clone, PartialEq)]
pub enum ConverseOutcome<T> {
    /// The call succeeded and produced a result.
    Completed(T),
    /// The call succeeded but the response carried nothing to extract.
    NoContent,
    /// The remote call failed.
    Failed(GatewayError),
}

impl<T> ConverseOutcome<T> {
    /// The result, or `None` for an empty or failed invocation.
    pub fn into_option(self) -> Option<T> {
        match self {
            ConverseOutcome::Completed(value) => Some(value),
            _ => None,
        }
    }

    pub fn completed(&self) -> Option<&T> {
        match self {
            ConverseOutcome::Completed(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&GatewayError> {
        match self {
            ConverseOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ConverseOutcome::Failed(_))
    }
}

/// Status line reported when the remote call fails.
pub fn invocation_error_message(model_id: &str, error: &GatewayError) -> String {
    format!("ERROR: Can't invoke '{}'. Reason: {}", model_id, error)
}

/// Issue the Converse call, reporting any failure before returning it.
pub(crate) async fn guarded_converse(
    gateway: &dyn ConverseGateway,
    telemetry: &dyn TelemetryReporter,
    observation: &'static str,
    request: ConverseRequest,
) -> Result<ConverseResponse, GatewayError> {
    let model_id = request.model_id.clone();
    debug!(
        model = %model_id,
        messages = request.messages.len(),
        system = request.system.len(),
        "Invoking Converse"
    );

    match gateway.converse(request).await {
        Ok(response) => Ok(response),
        Err(e) => {
            let message = invocation_error_message(&model_id, &e);
            telemetry.update_observation(observation, ObservationUpdate::failed(&message));
            error!(kind = e.kind(), retryable = e.is_retryable(), "{}", message);
            Err(e)
        }
    }
}

/// Observation metadata: the response envelope under `ResponseMetadata`,
/// overlaid with caller-supplied metadata.
pub(crate) fn observation_metadata(
    response: &ConverseResponse,
    caller: &Map<String, Value>,
) -> Map<String, Value> {
    let mut metadata = Map::new();
    metadata.insert(
        "ResponseMetadata".to_string(),
        response.response_metadata.clone(),
    );
    metadata.extend(caller.clone());
    metadata
}
