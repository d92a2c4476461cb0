//! Entry bootstrap insertion and its build-wide one-shot guard.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::ast::{Program, Stmt};
use crate::classifier;
use crate::synth::Synthesizer;

/// Set once the bootstrap has landed in some file of the build.
#[derive(Debug, Default)]
pub struct EntryGuard {
    inserted: AtomicBool,
}

impl EntryGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_claimed(&self) -> bool {
        self.inserted.load(Ordering::Acquire)
    }

    /// Atomic test-and-set. Only one caller per build gets `true`.
    pub fn try_claim(&self) -> bool {
        self.inserted
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// Splices the bootstrap at the top of `program` if it registers the root
/// component and no other file has claimed the guard. Returns whether
/// this call inserted it.
pub(crate) fn insert_bootstrap(program: &mut Program, synth: &Synthesizer, guard: &EntryGuard) -> bool {
    if guard.is_claimed() {
        return false;
    }
    if !program.body.iter().any(classifier::is_entry_statement) {
        return false;
    }
    if !guard.try_claim() {
        return false;
    }
    // A file instrumented by an earlier build already carries the block.
    if has_bootstrap(program, synth) {
        return false;
    }
    let bootstrap = synth.build_entry_bootstrap();
    program.body.splice(0..0, bootstrap);
    true
}

/// Both the default client import under the binding and the global install
/// must be present; an application's own import of the client is not enough.
fn has_bootstrap(program: &Program, synth: &Synthesizer) -> bool {
    let imports_client = program.body.iter().any(|stmt| {
        matches!(
            stmt,
            Stmt::Import(import)
                if import.source == synth.client_module()
                    && import.default.as_deref() == Some(synth.binding())
        )
    });
    if !imports_client {
        return false;
    }
    let install = synth.build_client_install();
    program.body.contains(&install)
}
