//! Wire envelope of one flush.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{ "header": ..., "body": [...] }`; `header` is omitted when null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub header: Value,
    pub body: Vec<Value>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
