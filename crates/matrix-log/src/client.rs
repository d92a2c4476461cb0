//! The telemetry batcher.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use matrix_core::constants::DEFAULT_FLUSH_INTERVAL_SECS;
use matrix_core::errors::{MatrixErrorCode, TransportError};
use parking_lot::{Mutex, MutexGuard, RwLock};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::Instrument;

use crate::config::BatcherConfig;
use crate::entry::{LogEntry, LogItem};
use crate::hooks::{BeforeAppStart, BeforeMessageSend, NoopHooks};
use crate::transport::{Batch, HttpTransport, Transport};

/// Result of one flush attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlushOutcome {
    /// Nothing buffered.
    Empty,
    /// Another flush was still running; this one was skipped.
    InFlight,
    Sent { count: usize },
    /// The batch was dropped.
    Failed { count: usize, reason: String },
}

/// Buffers payloads and flushes them as one batch per interval.
///
/// Construct inside a tokio runtime to get the recurring flush; outside one
/// the client still buffers and flushes on demand.
pub struct TelemetryClient {
    inner: Arc<Inner>,
    timer: Mutex<Option<FlushTimer>>,
}

struct Inner {
    buffer: Mutex<Vec<LogEntry>>,
    before_app_start: RwLock<Arc<dyn BeforeAppStart>>,
    before_message_send: RwLock<Arc<dyn BeforeMessageSend>>,
    endpoint_url: RwLock<String>,
    tracked_route_names: RwLock<Vec<String>>,
    transport: Arc<dyn Transport>,
    is_flushing: AtomicBool,
    flush_on_shutdown: bool,
}

struct FlushTimer {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl TelemetryClient {
    pub fn new(config: BatcherConfig, transport: Arc<dyn Transport>) -> Self {
        let inner = Arc::new(Inner {
            buffer: Mutex::new(Vec::new()),
            before_app_start: RwLock::new(Arc::new(NoopHooks)),
            before_message_send: RwLock::new(Arc::new(NoopHooks)),
            endpoint_url: RwLock::new(config.endpoint_url),
            tracked_route_names: RwLock::new(config.tracked_route_names),
            transport,
            is_flushing: AtomicBool::new(false),
            flush_on_shutdown: config.flush_on_shutdown,
        });
        let timer = FlushTimer::start(&inner, config.flush_interval);
        Self {
            inner,
            timer: Mutex::new(timer),
        }
    }

    /// Client backed by [`HttpTransport`] with the configured request timeout.
    pub fn with_http(config: BatcherConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(config.request_timeout)?;
        Ok(Self::new(config, Arc::new(transport)))
    }

    /// Runs the pre-send hook on `item` and buffers the result.
    /// `None` is ignored.
    pub async fn append_log(&self, item: Option<LogItem>) {
        self.inner.append_log(item).await;
    }

    /// Fire-and-forget [`append_log`](Self::append_log) on the current runtime.
    /// Returns `None` (and drops the item) when called outside a runtime.
    pub fn submit(&self, item: Option<LogItem>) -> Option<JoinHandle<()>> {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!("append outside a tokio runtime dropped");
                return None;
            }
        };
        let inner = Arc::clone(&self.inner);
        Some(handle.spawn(async move { inner.append_log(item).await }))
    }

    pub async fn flush(&self) -> FlushOutcome {
        self.inner.flush().await
    }

    pub fn set_on_before_app_start(&self, hook: Option<Arc<dyn BeforeAppStart>>) {
        if let Some(hook) = hook {
            *self.inner.before_app_start.write() = hook;
        }
    }

    pub fn set_on_before_message_send(&self, hook: Option<Arc<dyn BeforeMessageSend>>) {
        if let Some(hook) = hook {
            *self.inner.before_message_send.write() = hook;
        }
    }

    pub fn set_endpoint_url(&self, url: Option<String>) {
        if let Some(url) = url {
            *self.inner.endpoint_url.write() = url;
        }
    }

    pub fn set_tracked_route_names(&self, names: Option<Vec<String>>) {
        if let Some(names) = names {
            *self.inner.tracked_route_names.write() = names;
        }
    }

    pub fn endpoint_url(&self) -> String {
        self.inner.endpoint_url.read().clone()
    }

    pub fn tracked_route_names(&self) -> Vec<String> {
        self.inner.tracked_route_names.read().clone()
    }

    /// Live view of the buffer. Appends block while the guard is held.
    pub fn get_log(&self) -> MutexGuard<'_, Vec<LogEntry>> {
        self.inner.buffer.lock()
    }

    /// Stops the timer (letting a running tick finish), then flushes once if
    /// `flush_on_shutdown` is set.
    pub async fn shutdown(&self) -> Option<FlushOutcome> {
        let timer = self.timer.lock().take();
        if let Some(timer) = timer {
            timer.stop().await;
        }
        if self.inner.flush_on_shutdown {
            Some(self.inner.flush().await)
        } else {
            None
        }
    }
}

impl std::fmt::Debug for TelemetryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryClient")
            .field("buffered", &self.inner.buffer.lock().len())
            .field("endpoint_url", &*self.inner.endpoint_url.read())
            .field("timer_running", &self.timer.lock().is_some())
            .finish()
    }
}

impl Inner {
    async fn append_log(&self, item: Option<LogItem>) {
        let Some(item) = item else {
            return;
        };
        let (action, event_id, other) = item.hook_arguments();
        let hook = Arc::clone(&*self.before_message_send.read());
        let payload = hook.transform(action, event_id, other).await;
        self.buffer.lock().push(LogEntry::now(payload));
    }

    async fn flush(&self) -> FlushOutcome {
        if self
            .is_flushing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("flush skipped, previous flush still running");
            return FlushOutcome::InFlight;
        }
        let _release = ReleaseOnDrop(&self.is_flushing);

        if self.buffer.lock().is_empty() {
            return FlushOutcome::Empty;
        }

        let header_hook = Arc::clone(&*self.before_app_start.read());
        let header = header_hook.header().await;

        // Snapshot after the header; appends during the send wait for the next flush.
        let entries = std::mem::take(&mut *self.buffer.lock());
        if entries.is_empty() {
            return FlushOutcome::Empty;
        }
        let count = entries.len();
        let batch = Batch {
            header,
            body: entries.into_iter().map(|entry| entry.payload).collect(),
        };
        let endpoint = self.endpoint_url.read().clone();

        let span = matrix_core::flush_span!(count, endpoint);
        match self.transport.send(&endpoint, &batch).instrument(span).await {
            Ok(()) => {
                tracing::debug!(count, endpoint = %endpoint, "batch sent");
                FlushOutcome::Sent { count }
            }
            Err(e) => {
                tracing::warn!(
                    count,
                    endpoint = %endpoint,
                    code = e.error_code(),
                    error = %e,
                    "batch dropped"
                );
                FlushOutcome::Failed {
                    count,
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// Clears the in-flight flag on every exit path, including cancellation.
struct ReleaseOnDrop<'a>(&'a AtomicBool);

impl Drop for ReleaseOnDrop<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl FlushTimer {
    fn start(inner: &Arc<Inner>, period: Duration) -> Option<Self> {
        let period = if period.is_zero() {
            let fallback = Duration::from_secs(DEFAULT_FLUSH_INTERVAL_SECS);
            tracing::warn!(
                fallback_secs = DEFAULT_FLUSH_INTERVAL_SECS,
                "zero flush interval, using default"
            );
            fallback
        } else {
            period
        };
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!("no tokio runtime; periodic flush disabled");
                return None;
            }
        };
        let (stop, mut stopped) = watch::channel(false);
        let inner = Arc::clone(inner);
        let task = handle.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        inner.flush().await;
                    }
                    // Fires on an explicit stop and when the client is dropped.
                    _ = stopped.changed() => break,
                }
            }
        });
        Some(Self { stop, task })
    }

    async fn stop(self) {
        let _ = self.stop.send(true);
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "flush timer ended abnormally");
        }
    }
}
