//! Process-wide client, the target of `global.<binding>` calls in
//! instrumented code.
//!
//! [`install`] a configured client at startup, or let the first call create
//! an HTTP-backed client with default settings.

use std::sync::{Arc, OnceLock};

use matrix_core::errors::TransportError;
use parking_lot::MutexGuard;

use crate::client::TelemetryClient;
use crate::config::BatcherConfig;
use crate::entry::{LogEntry, LogItem};
use crate::hooks::{BeforeAppStart, BeforeMessageSend};

static CLIENT: OnceLock<Arc<TelemetryClient>> = OnceLock::new();

/// Installs `client` as the process-wide instance. If one is already
/// installed, the rejected client comes back in `Err`.
pub fn install(client: TelemetryClient) -> Result<(), Arc<TelemetryClient>> {
    CLIENT.set(Arc::new(client))
}

fn instance() -> Result<&'static Arc<TelemetryClient>, TransportError> {
    if let Some(client) = CLIENT.get() {
        return Ok(client);
    }
    let client = TelemetryClient::with_http(BatcherConfig::default())?;
    tracing::debug!("created default telemetry client");
    Ok(CLIENT.get_or_init(|| Arc::new(client)))
}

pub fn get_instance() -> Result<Arc<TelemetryClient>, TransportError> {
    instance().map(Arc::clone)
}

/// Fire-and-forget append on the process-wide client.
pub fn append_log(item: Option<LogItem>) {
    match instance() {
        Ok(client) => {
            let _ = client.submit(item);
        }
        Err(e) => tracing::warn!(error = %e, "telemetry client unavailable, record dropped"),
    }
}

pub fn set_on_before_app_start(hook: Option<Arc<dyn BeforeAppStart>>) {
    with_instance(|client| client.set_on_before_app_start(hook));
}

pub fn set_on_before_message_send(hook: Option<Arc<dyn BeforeMessageSend>>) {
    with_instance(|client| client.set_on_before_message_send(hook));
}

pub fn set_endpoint_url(url: Option<String>) {
    with_instance(|client| client.set_endpoint_url(url));
}

pub fn set_tracked_route_names(names: Option<Vec<String>>) {
    with_instance(|client| client.set_tracked_route_names(names));
}

pub fn get_log() -> Result<MutexGuard<'static, Vec<LogEntry>>, TransportError> {
    Ok(instance()?.get_log())
}

fn with_instance(f: impl FnOnce(&TelemetryClient)) {
    match instance() {
        Ok(client) => f(client),
        Err(e) => tracing::warn!(error = %e, "telemetry client unavailable, setting ignored"),
    }
}
