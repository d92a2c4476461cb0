//! Event-id derivation: a stable screen/module id from a source path.

use crate::constants::{EVENT_ID_SEGMENTS, SOURCE_SUFFIXES};

/// Derive the event id for a source path.
///
/// Strips a trailing source suffix, splits on `/` or `\`, keeps at most the
/// last three tokens and joins them with `_`. Empty tokens are kept, so a
/// short absolute path keeps its leading separator as a leading `_`.
pub fn derive_event_id(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    let stem = SOURCE_SUFFIXES
        .iter()
        .find_map(|suffix| path.strip_suffix(suffix))
        .unwrap_or(path);

    let tokens: Vec<&str> = stem.split(['/', '\\']).collect();
    let start = tokens.len().saturating_sub(EVENT_ID_SEGMENTS);
    tokens[start..].join("_")
}
