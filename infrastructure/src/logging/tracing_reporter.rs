//! Observation reporter that emits `tracing` events

use super::OBSERVATION_TYPE;
use bridge_application::TelemetryReporter;
use bridge_domain::ObservationUpdate;
use tracing::{info, warn};

/// Logs each observation update at `info`, or `warn` for error updates.
///
/// Payloads are rendered as compact JSON in the `update` field.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTelemetryReporter;

impl TelemetryReporter for TracingTelemetryReporter {
    fn update_observation(&self, observation: &'static str, update: ObservationUpdate) {
        let payload = serde_json::to_string(&update).unwrap_or_default();

        if update.is_error() {
            warn!(
                observation,
                kind = OBSERVATION_TYPE,
                update = %payload,
                "Observation failed"
            );
        } else {
            info!(
                observation,
                kind = OBSERVATION_TYPE,
                update = %payload,
                "Observation updated"
            );
        }
    }
}
