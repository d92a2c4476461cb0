//! The telemetry record injected at build time and consumed at runtime.

pub mod event_id;
pub mod instrumentation_record;

pub use event_id::derive_event_id;
pub use instrumentation_record::InstrumentationRecord;
