//! TelemetryClient behavior against a recording transport.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use matrix_core::errors::TransportError;
use matrix_core::InstrumentationRecord;
use matrix_log::*;
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::sync::Notify;

#[derive(Default)]
struct RecordingTransport {
    sent: Mutex<Vec<(String, Batch)>>,
    fail: AtomicBool,
}

impl RecordingTransport {
    fn failing() -> Self {
        Self {
            fail: AtomicBool::new(true),
            ..Default::default()
        }
    }

    fn batches(&self) -> Vec<(String, Batch)> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, endpoint: &str, batch: &Batch) -> Result<(), TransportError> {
        self.sent.lock().push((endpoint.to_string(), batch.clone()));
        if self.fail.load(Ordering::SeqCst) {
            return Err(TransportError::Status {
                url: endpoint.to_string(),
                status: 503,
            });
        }
        Ok(())
    }
}

fn config() -> BatcherConfig {
    BatcherConfig {
        flush_interval: Duration::from_secs(8),
        endpoint_url: "https://collector.test/report".into(),
        request_timeout: Duration::from_secs(1),
        flush_on_shutdown: true,
        tracked_route_names: vec![],
    }
}

fn record(action: &str) -> Option<LogItem> {
    Some(InstrumentationRecord::interaction("/app/src/screens/Home/index.js", "Button", action, "Go").into())
}

/// Pre-send hook that echoes its arguments.
fn echo_hook() -> Arc<dyn BeforeMessageSend> {
    Arc::new(|action: Option<String>, event_id: String, other: MessageContext| async move {
        json!({ "action": action, "evid": event_id, "other": other })
    })
}

#[tokio::test]
async fn test_three_appends_one_flush() {
    let transport = Arc::new(RecordingTransport::default());
    let client = TelemetryClient::new(config(), transport.clone());
    client.set_on_before_message_send(Some(echo_hook()));
    client.set_on_before_app_start(Some(Arc::new(|| async { json!({"app": "demo"}) })));

    for action in ["onPress", "onLongPress", "onChangeText"] {
        client.append_log(record(action)).await;
    }
    assert_eq!(client.flush().await, FlushOutcome::Sent { count: 3 });

    let batches = transport.batches();
    assert_eq!(batches.len(), 1);
    let (endpoint, batch) = &batches[0];
    assert_eq!(endpoint, "https://collector.test/report");
    assert_eq!(batch.header, json!({"app": "demo"}));
    let actions: Vec<&Value> = batch.body.iter().map(|p| &p["action"]).collect();
    assert_eq!(actions, vec!["onPress", "onLongPress", "onChangeText"]);
    assert_eq!(batch.body[0]["evid"], "screens_Home_index");
    assert_eq!(batch.body[0]["other"], json!({"elementType": "Button", "innerText": "Go"}));
    assert!(client.get_log().is_empty());
}

#[tokio::test]
async fn test_failed_send_still_clears_buffer() {
    let transport = Arc::new(RecordingTransport::failing());
    let client = TelemetryClient::new(config(), transport.clone());
    client.append_log(record("onPress")).await;
    client.append_log(record("onPress")).await;

    match client.flush().await {
        FlushOutcome::Failed { count, reason } => {
            assert_eq!(count, 2);
            assert!(reason.contains("503"), "{reason}");
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert!(client.get_log().is_empty());
    assert_eq!(client.flush().await, FlushOutcome::Empty);
    assert_eq!(transport.batches().len(), 1, "no retry");
}

#[tokio::test]
async fn test_none_append_is_noop_and_empty_flush_skips_send() {
    let transport = Arc::new(RecordingTransport::default());
    let client = TelemetryClient::new(config(), transport.clone());
    client.append_log(None).await;
    assert!(client.get_log().is_empty());
    assert_eq!(client.flush().await, FlushOutcome::Empty);
    assert!(transport.batches().is_empty());
}

#[tokio::test]
async fn test_default_hooks_store_null_and_omit_header() {
    let transport = Arc::new(RecordingTransport::default());
    let client = TelemetryClient::new(config(), transport.clone());
    client.append_log(Some("Matrixlog starts recording.".into())).await;
    {
        let log = client.get_log();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].payload, Value::Null);
        assert!(log[0].timestamp > 0);
    }
    client.flush().await;
    let (_, batch) = &transport.batches()[0];
    assert_eq!(serde_json::to_value(batch).unwrap(), json!({"body": [null]}));
}

#[tokio::test]
async fn test_marker_reaches_hook_without_action() {
    let transport = Arc::new(RecordingTransport::default());
    let client = TelemetryClient::new(config(), transport);
    client.set_on_before_message_send(Some(echo_hook()));
    client.append_log(Some("Matrixlog starts recording.".into())).await;
    assert_eq!(
        client.get_log()[0].payload,
        json!({"action": null, "evid": "", "other": {}})
    );
}

#[tokio::test]
async fn test_setters_ignore_none_and_last_write_wins() {
    let transport = Arc::new(RecordingTransport::default());
    let client = TelemetryClient::new(config(), transport.clone());

    client.set_endpoint_url(Some("https://first.test".into()));
    client.set_endpoint_url(Some("https://second.test".into()));
    client.set_endpoint_url(None);
    assert_eq!(client.endpoint_url(), "https://second.test");

    client.set_tracked_route_names(Some(vec!["Home".into()]));
    client.set_tracked_route_names(None);
    assert_eq!(client.tracked_route_names(), vec!["Home".to_string()]);

    client.set_on_before_message_send(Some(Arc::new(
        |_: Option<String>, _: String, _: MessageContext| async { json!(1) },
    )));
    client.set_on_before_message_send(Some(Arc::new(
        |_: Option<String>, _: String, _: MessageContext| async { json!(2) },
    )));
    client.set_on_before_message_send(None);
    client.append_log(record("onPress")).await;
    assert_eq!(client.get_log()[0].payload, json!(2));

    client.flush().await;
    assert_eq!(transport.batches()[0].0, "https://second.test");
}

/// Transport that parks inside `send` until released.
struct BlockingTransport {
    entered: Notify,
    release: Notify,
    calls: AtomicUsize,
}

#[async_trait]
impl Transport for BlockingTransport {
    async fn send(&self, _: &str, _: &Batch) -> Result<(), TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
        Ok(())
    }
}

#[tokio::test]
async fn test_overlapping_flush_is_skipped_and_late_appends_kept() {
    let transport = Arc::new(BlockingTransport {
        entered: Notify::new(),
        release: Notify::new(),
        calls: AtomicUsize::new(0),
    });
    let client = Arc::new(TelemetryClient::new(config(), transport.clone()));
    client.append_log(record("onPress")).await;

    let first = tokio::spawn({
        let client = Arc::clone(&client);
        async move { client.flush().await }
    });
    transport.entered.notified().await;

    assert_eq!(client.flush().await, FlushOutcome::InFlight);
    client.append_log(record("onSelect")).await;

    transport.release.notify_one();
    assert_eq!(first.await.unwrap(), FlushOutcome::Sent { count: 1 });
    assert_eq!(client.get_log().len(), 1, "append during send waits for next flush");
    assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_timer_flushes_after_one_interval() {
    let transport = Arc::new(RecordingTransport::default());
    let client = TelemetryClient::new(config(), transport.clone());
    client.append_log(record("onPress")).await;

    tokio::time::sleep(Duration::from_secs(7)).await;
    assert!(transport.batches().is_empty(), "first tick is one interval out");

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(transport.batches().len(), 1);
    assert!(client.get_log().is_empty());
}

#[tokio::test]
async fn test_shutdown_flushes_once() {
    let transport = Arc::new(RecordingTransport::default());
    let client = TelemetryClient::new(config(), transport.clone());
    client.append_log(record("onPress")).await;

    assert_eq!(client.shutdown().await, Some(FlushOutcome::Sent { count: 1 }));
    assert_eq!(transport.batches().len(), 1);

    let quiet = TelemetryClient::new(
        BatcherConfig {
            flush_on_shutdown: false,
            ..config()
        },
        transport.clone(),
    );
    quiet.append_log(record("onPress")).await;
    assert_eq!(quiet.shutdown().await, None);
    assert_eq!(quiet.get_log().len(), 1);
}

#[tokio::test]
async fn test_submit_appends_in_background() {
    let transport = Arc::new(RecordingTransport::default());
    let client = TelemetryClient::new(config(), transport);
    let handle = client.submit(record("onPress")).expect("inside a runtime");
    handle.await.unwrap();
    assert_eq!(client.get_log().len(), 1);
}

#[test]
fn test_client_outside_runtime_buffers_without_timer() {
    let transport = Arc::new(RecordingTransport::default());
    let client = TelemetryClient::new(config(), transport);
    assert!(client.submit(record("onPress")).is_none());
    assert!(client.get_log().is_empty());
}

#[test]
fn test_config_from_runtime_defaults() {
    let config = BatcherConfig::default();
    assert_eq!(config.flush_interval, Duration::from_secs(8));
    assert_eq!(config.endpoint_url, "https://freegolog.ofo.com/report/v1");
    assert_eq!(config.request_timeout, Duration::from_secs(30));
    assert!(config.flush_on_shutdown);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_appends_keep_every_record() {
    let transport = Arc::new(RecordingTransport::default());
    let client = Arc::new(TelemetryClient::new(config(), transport.clone()));
    client.set_on_before_message_send(Some(Arc::new(
        |action: Option<String>, _: String, _: MessageContext| {
            let delay = Duration::from_millis(rand::Rng::gen_range(&mut rand::thread_rng(), 0..20));
            async move {
                tokio::time::sleep(delay).await;
                json!(action)
            }
        },
    )));

    let tasks: Vec<_> = (0..100)
        .map(|i| {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.append_log(record(&format!("onPress{i}"))).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }
    assert_eq!(client.get_log().len(), 100);

    assert_eq!(client.flush().await, FlushOutcome::Sent { count: 100 });
    let batches = transport.batches();
    assert_eq!(batches.len(), 1);
    let mut actions: Vec<String> = batches[0]
        .1
        .body
        .iter()
        .filter_map(|p| p.as_str().map(str::to_string))
        .collect();
    actions.sort();
    actions.dedup();
    assert_eq!(actions.len(), 100);
}

#[tokio::test(start_paused = true)]
async fn test_zero_interval_falls_back_to_default() {
    let runtime = matrix_core::config::MatrixConfig::from_toml("[runtime]\nflush_interval_secs = 0")
        .unwrap()
        .runtime;
    let batcher = BatcherConfig {
        endpoint_url: "https://collector.test/report".into(),
        ..BatcherConfig::from(&runtime)
    };
    assert_eq!(batcher.flush_interval, Duration::ZERO);

    let transport = Arc::new(RecordingTransport::default());
    let client = TelemetryClient::new(batcher, transport.clone());
    client.append_log(record("onPress")).await;

    tokio::time::sleep(Duration::from_secs(7)).await;
    assert!(transport.batches().is_empty());

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(transport.batches().len(), 1, "timer still running on the default period");
    assert!(client.get_log().is_empty());
}
