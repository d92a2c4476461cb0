//! Resolved batcher settings.

use std::time::Duration;

use matrix_core::config::RuntimeConfig;

/// Batcher settings with every default applied.
#[derive(Debug, Clone, PartialEq)]
pub struct BatcherConfig {
    pub flush_interval: Duration,
    pub endpoint_url: String,
    pub request_timeout: Duration,
    pub flush_on_shutdown: bool,
    pub tracked_route_names: Vec<String>,
}

impl From<&RuntimeConfig> for BatcherConfig {
    fn from(config: &RuntimeConfig) -> Self {
        Self {
            flush_interval: Duration::from_secs(config.effective_flush_interval_secs()),
            endpoint_url: config.effective_endpoint_url().to_string(),
            request_timeout: Duration::from_secs(config.effective_request_timeout_secs()),
            flush_on_shutdown: config.effective_flush_on_shutdown(),
            tracked_route_names: config.tracked_route_names.clone(),
        }
    }
}

impl Default for BatcherConfig {
    fn default() -> Self {
        Self::from(&RuntimeConfig::default())
    }
}
