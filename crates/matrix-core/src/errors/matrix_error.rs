//! Top-level error aggregating subsystem errors.

use super::error_code::MatrixErrorCode;
use super::{ConfigError, TransportError};

/// Any Matrix error. Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum MatrixError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

impl MatrixErrorCode for MatrixError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Transport(e) => e.error_code(),
        }
    }
}
