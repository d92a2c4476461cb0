//! Error handling for Matrix.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod matrix_error;
pub mod transport_error;

pub use config_error::ConfigError;
pub use error_code::MatrixErrorCode;
pub use matrix_error::MatrixError;
pub use transport_error::TransportError;
