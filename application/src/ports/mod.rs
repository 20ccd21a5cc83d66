//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod converse_gateway;
pub mod image_fetcher;
pub mod secret_store;
pub mod telemetry;
