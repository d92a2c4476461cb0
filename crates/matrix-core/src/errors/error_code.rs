//! MatrixErrorCode trait for stable, host-facing error codes.

/// Trait for mapping Matrix errors to stable error codes.
/// Hosts driving the instrumenter (bundler plugins, scripts) match on the
/// code rather than on the message text.
pub trait MatrixErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted host string: `[ERROR_CODE] message`.
    fn host_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const CONFIG_NOT_FOUND: &str = "CONFIG_NOT_FOUND";
pub const TRANSPORT_ERROR: &str = "TRANSPORT_ERROR";
pub const TRANSPORT_STATUS: &str = "TRANSPORT_STATUS";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
