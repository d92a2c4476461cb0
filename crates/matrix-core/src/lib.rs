//! # matrix-core
//!
//! Shared foundation for the Matrix instrumentation toolkit: the telemetry
//! record injected at build time, event-id derivation, subsystem errors,
//! layered configuration, build events, and tracing setup.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod record;
pub mod tracing;

pub use record::{derive_event_id, InstrumentationRecord};
