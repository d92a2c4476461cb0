//! Batch delivery.

mod http;
pub mod protocol;

use async_trait::async_trait;
use matrix_core::errors::TransportError;

pub use http::HttpTransport;
pub use protocol::Batch;

/// Sends one batch to a collector. One call per flush; no retries.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, endpoint: &str, batch: &Batch) -> Result<(), TransportError>;
}
