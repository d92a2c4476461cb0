//! Span definitions per operation: file rewrite, batch flush.

/// Create a span covering one file's rewrite pass.
#[macro_export]
macro_rules! rewrite_span {
    ($file:expr) => {
        tracing::debug_span!("matrix.rewrite", file = %$file)
    };
}

/// Create a span covering one batch flush.
#[macro_export]
macro_rules! flush_span {
    ($batch_size:expr, $endpoint:expr) => {
        tracing::info_span!("matrix.flush", batch_size = $batch_size, endpoint = %$endpoint)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const REWRITE: &str = "matrix.rewrite";
    pub const FLUSH: &str = "matrix.flush";
}
