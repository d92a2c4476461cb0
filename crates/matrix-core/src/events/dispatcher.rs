//! Synchronous event dispatch, zero overhead when no handlers are registered.

use std::sync::Arc;

use super::handler::InstrumentEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
#[derive(Default, Clone)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn InstrumentEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn InstrumentEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// A handler that panics is logged and skipped; later handlers still run.
    fn emit<F: Fn(&dyn InstrumentEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                ::tracing::warn!("instrument event handler panicked");
            }
        }
    }

    pub fn emit_file_instrumented(&self, event: &FileInstrumentedEvent) {
        self.emit(|h| h.on_file_instrumented(event));
    }

    pub fn emit_hook_instrumented(&self, event: &HookInstrumentedEvent) {
        self.emit(|h| h.on_hook_instrumented(event));
    }

    pub fn emit_attribute_wrapped(&self, event: &AttributeWrappedEvent) {
        self.emit(|h| h.on_attribute_wrapped(event));
    }

    pub fn emit_entry_inserted(&self, event: &EntryInsertedEvent) {
        self.emit(|h| h.on_entry_inserted(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
