//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the Matrix tracing/logging system.
///
/// Reads the `MATRIX_LOG` environment variable for per-subsystem log levels.
/// Format: `MATRIX_LOG=matrix_instrument=debug,matrix_log=info`
///
/// Falls back to `matrix=info` if `MATRIX_LOG` is not set or is invalid.
///
/// Calling it more than once is harmless; only the first call installs
/// the subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("MATRIX_LOG")
            .unwrap_or_else(|_| EnvFilter::new("matrix=info"));

        // `try_init` so a host that already installed a global subscriber
        // keeps its own.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
