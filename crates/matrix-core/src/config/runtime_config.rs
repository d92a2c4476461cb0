//! Runtime batcher configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ENDPOINT_URL, DEFAULT_FLUSH_INTERVAL_SECS};

/// Configuration for the runtime telemetry batcher.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Flush period in seconds. Default: 8.
    pub flush_interval_secs: Option<u64>,
    /// Collector endpoint. Default: the reporting endpoint in `constants`.
    pub endpoint_url: Option<String>,
    /// Per-request timeout in seconds. Default: 30.
    pub request_timeout_secs: Option<u64>,
    /// Flush once more on explicit shutdown. Default: true.
    pub flush_on_shutdown: Option<bool>,
    /// Route names the application wants tracked.
    #[serde(default)]
    pub tracked_route_names: Vec<String>,
}

impl RuntimeConfig {
    /// Returns the effective flush interval, defaulting to 8 seconds.
    pub fn effective_flush_interval_secs(&self) -> u64 {
        self.flush_interval_secs.unwrap_or(DEFAULT_FLUSH_INTERVAL_SECS)
    }

    /// Returns the effective endpoint URL.
    pub fn effective_endpoint_url(&self) -> &str {
        self.endpoint_url.as_deref().unwrap_or(DEFAULT_ENDPOINT_URL)
    }

    /// Returns the effective request timeout, defaulting to 30 seconds.
    pub fn effective_request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs.unwrap_or(30)
    }

    /// Returns whether shutdown flushes, defaulting to true.
    pub fn effective_flush_on_shutdown(&self) -> bool {
        self.flush_on_shutdown.unwrap_or(true)
    }
}
