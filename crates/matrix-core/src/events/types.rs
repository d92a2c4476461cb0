//! Event payload types emitted while instrumenting a build.

/// Payload for `on_file_instrumented`.
#[derive(Debug, Clone, Default)]
pub struct FileInstrumentedEvent {
    pub file: String,
    pub hooks_appended: usize,
    pub hooks_inserted: usize,
    pub attributes_wrapped: usize,
    pub entry_inserted: bool,
    pub duration_us: u64,
}

/// Payload for `on_hook_instrumented`.
#[derive(Debug, Clone)]
pub struct HookInstrumentedEvent {
    pub file: String,
    pub class_name: Option<String>,
    pub hook: String,
    /// True when the hook was synthesized, false when a log was appended.
    pub inserted: bool,
}

/// Payload for `on_attribute_wrapped`.
#[derive(Debug, Clone)]
pub struct AttributeWrappedEvent {
    pub file: String,
    pub element: String,
    pub attribute: String,
}

/// Payload for `on_entry_inserted`.
#[derive(Debug, Clone)]
pub struct EntryInsertedEvent {
    pub file: String,
}
