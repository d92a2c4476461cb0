//! InstrumentEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for observing a build's instrumentation work.
///
/// All methods have no-op default implementations, so handlers only need
/// to override the events they care about. `Send + Sync` is required
/// because files may be instrumented in parallel.
pub trait InstrumentEventHandler: Send + Sync {
    fn on_file_instrumented(&self, _event: &FileInstrumentedEvent) {}
    fn on_hook_instrumented(&self, _event: &HookInstrumentedEvent) {}
    fn on_attribute_wrapped(&self, _event: &AttributeWrappedEvent) {}
    fn on_entry_inserted(&self, _event: &EntryInsertedEvent) {}
}
