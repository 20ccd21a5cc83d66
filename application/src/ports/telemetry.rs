//! Port for observation telemetry.
//!
//! Defines the [`TelemetryReporter`] trait used by the invokers to record
//! inputs, parameters, outputs, token usage and error status of each call.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port feeds a structured
//! observability backend (one `generation` observation per invocation).

use bridge_domain::ObservationUpdate;

/// Port for reporting observation updates.
///
/// `update_observation` is synchronous and infallible. Implementations
/// swallow their own reporting failures.
pub trait TelemetryReporter: Send + Sync {
    /// Apply `update` to the observation named `observation`.
    fn update_observation(&self, observation: &'static str, update: ObservationUpdate);
}

/// No-op implementation for tests and when telemetry is disabled.
pub struct NoTelemetry;

impl TelemetryReporter for NoTelemetry {
    fn update_observation(&self, _observation: &'static str, _update: ObservationUpdate) {}
}
