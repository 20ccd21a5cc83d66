//! Telemetry records exchanged with the observability backend.

pub mod observation;
