//! # matrix-log
//!
//! Runtime half of Matrix. Instrumented code calls `appendLog(record)`; a
//! [`TelemetryClient`] turns each record into a payload through the
//! configured [`BeforeMessageSend`] hook, buffers it, and POSTs the buffer
//! as one batch every flush interval.
//!
//! Delivery is best-effort: a failed batch is logged and dropped.

pub mod client;
pub mod config;
pub mod entry;
pub mod global;
pub mod hooks;
pub mod transport;

pub use client::{FlushOutcome, TelemetryClient};
pub use config::BatcherConfig;
pub use entry::{LogEntry, LogItem, MessageContext};
pub use hooks::{BeforeAppStart, BeforeMessageSend, NoopHooks};
pub use transport::{Batch, HttpTransport, Transport};
