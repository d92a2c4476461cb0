//! Buffered entries and what `appendLog` accepts.

use matrix_core::InstrumentationRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One buffered payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Epoch milliseconds at append time.
    pub timestamp: i64,
    /// Whatever the pre-send hook returned.
    pub payload: Value,
}

impl LogEntry {
    pub fn now(payload: Value) -> Self {
        Self {
            timestamp: chrono::Utc::now().timestamp_millis(),
            payload,
        }
    }
}

/// `other` argument of the pre-send hook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContext {
    #[serde(rename = "elementType", skip_serializing_if = "Option::is_none")]
    pub element_type: Option<String>,
    #[serde(rename = "innerText", skip_serializing_if = "Option::is_none")]
    pub inner_text: Option<String>,
}

/// What instrumented code hands to `appendLog`: an injected record, or the
/// bare marker string the bootstrap logs at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogItem {
    Record(InstrumentationRecord),
    Marker(String),
}

impl LogItem {
    /// `(action, event_id, other)` as the pre-send hook receives them.
    pub(crate) fn hook_arguments(self) -> (Option<String>, String, MessageContext) {
        match self {
            LogItem::Record(record) => {
                let event_id = matrix_core::derive_event_id(&record.source_locator);
                (
                    Some(record.action_name),
                    event_id,
                    MessageContext {
                        element_type: Some(record.element_kind),
                        inner_text: record.text,
                    },
                )
            }
            LogItem::Marker(_) => (None, String::new(), MessageContext::default()),
        }
    }
}

impl From<InstrumentationRecord> for LogItem {
    fn from(record: InstrumentationRecord) -> Self {
        LogItem::Record(record)
    }
}

impl From<&str> for LogItem {
    fn from(marker: &str) -> Self {
        LogItem::Marker(marker.to_string())
    }
}

impl From<String> for LogItem {
    fn from(marker: String) -> Self {
        LogItem::Marker(marker)
    }
}
