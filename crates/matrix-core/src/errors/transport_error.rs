//! Transport errors raised while delivering a telemetry batch.

use super::error_code::{self, MatrixErrorCode};

/// Errors that can occur while sending a batch to the collector.
///
/// The batcher logs these and drops the batch; they never reach the
/// instrumented application.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("collector at {url} answered HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("batch serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl MatrixErrorCode for TransportError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Request { .. } => error_code::TRANSPORT_ERROR,
            Self::Status { .. } => error_code::TRANSPORT_STATUS,
            Self::Serialize(_) => error_code::SERIALIZATION_ERROR,
        }
    }
}
