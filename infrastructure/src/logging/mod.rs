//! Logging infrastructure: observation telemetry sinks.
//!
//! Provides two [`TelemetryReporter`](bridge_application::TelemetryReporter)
//! implementations:
//!
//! - [`JsonlTelemetryReporter`]: one JSON line per observation update
//! - [`TracingTelemetryReporter`]: forwards updates to `tracing` events

mod jsonl_observation;
mod tracing_reporter;

pub use jsonl_observation::JsonlTelemetryReporter;
pub use tracing_reporter::TracingTelemetryReporter;

/// Observation type attached to every update
pub const OBSERVATION_TYPE: &str = "generation";
