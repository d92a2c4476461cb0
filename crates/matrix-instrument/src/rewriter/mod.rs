//! Tree rewriter: one `Build` per compilation, three passes per file.
//!
//! Passes run in a fixed order (lifecycle, interaction, entry). Each pass
//! keeps its own [`TraversalMarks`]; the only state shared across files is
//! the [`EntryGuard`].

pub mod entry;
mod interaction;
mod lifecycle;
pub mod marks;

use std::time::Instant;

use matrix_core::config::{InstrumentConfig, MatrixConfig};
use matrix_core::events::types::{EntryInsertedEvent, FileInstrumentedEvent};
use matrix_core::events::EventDispatcher;
use rayon::prelude::*;
use serde::Serialize;

pub use entry::EntryGuard;
pub use marks::TraversalMarks;

use crate::ast::{SourceUnit, TreeBuilder};
use crate::synth::Synthesizer;

/// What one file's rewrite changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub file: String,
    pub hooks_appended: usize,
    pub hooks_inserted: usize,
    pub attributes_wrapped: usize,
    pub entry_inserted: bool,
    pub duration_us: u64,
}

impl FileReport {
    fn new(file: &str) -> Self {
        Self {
            file: file.to_string(),
            ..Default::default()
        }
    }

    /// True when the rewrite left the tree untouched.
    pub fn is_unchanged(&self) -> bool {
        self.hooks_appended == 0
            && self.hooks_inserted == 0
            && self.attributes_wrapped == 0
            && !self.entry_inserted
    }
}

/// Read-only state every pass of one file sees.
pub(crate) struct PassContext<'p> {
    pub(crate) file: &'p str,
    pub(crate) synth: &'p Synthesizer,
    pub(crate) events: &'p EventDispatcher,
}

/// One build invocation.
#[derive(Debug)]
pub struct Build {
    config: InstrumentConfig,
    synth: Synthesizer,
    entry: EntryGuard,
    events: EventDispatcher,
}

impl Build {
    pub fn new(config: InstrumentConfig) -> Self {
        Self {
            synth: Synthesizer::new(&config),
            config,
            entry: EntryGuard::new(),
            events: EventDispatcher::new(),
        }
    }

    pub fn from_config(config: &MatrixConfig) -> Self {
        Self::new(config.instrument.clone())
    }

    /// Replace the event dispatcher (handlers observe every rewrite).
    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    pub fn config(&self) -> &InstrumentConfig {
        &self.config
    }

    pub fn synthesizer(&self) -> &Synthesizer {
        &self.synth
    }

    /// Whether some file of this build already received the bootstrap.
    pub fn entry_inserted(&self) -> bool {
        self.entry.is_claimed()
    }

    /// Rewrite one file in place.
    pub fn instrument_file(&self, unit: &mut SourceUnit) -> FileReport {
        let span = matrix_core::rewrite_span!(unit.path);
        let _guard = span.enter();
        let start = Instant::now();

        let ctx = PassContext {
            file: &unit.path,
            synth: &self.synth,
            events: &self.events,
        };
        let mut report = FileReport::new(&unit.path);
        let mut tree = TreeBuilder::for_program(&mut unit.program);

        lifecycle::run(
            &mut unit.program,
            &ctx,
            &self.config.lifecycle,
            &mut tree,
            &mut report,
        );
        interaction::run(&mut unit.program, &ctx, &mut report);
        report.entry_inserted = entry::insert_bootstrap(&mut unit.program, &self.synth, &self.entry);

        if report.entry_inserted {
            tracing::info!(file = %unit.path, "entry bootstrap inserted");
            self.events.emit_entry_inserted(&EntryInsertedEvent {
                file: unit.path.clone(),
            });
        }

        report.duration_us = start.elapsed().as_micros() as u64;
        tracing::debug!(
            file = %unit.path,
            hooks_appended = report.hooks_appended,
            hooks_inserted = report.hooks_inserted,
            attributes_wrapped = report.attributes_wrapped,
            rewrite_time_us = report.duration_us,
            "file instrumented"
        );
        self.events.emit_file_instrumented(&FileInstrumentedEvent {
            file: report.file.clone(),
            hooks_appended: report.hooks_appended,
            hooks_inserted: report.hooks_inserted,
            attributes_wrapped: report.attributes_wrapped,
            entry_inserted: report.entry_inserted,
            duration_us: report.duration_us,
        });
        report
    }

    /// Rewrite many files in parallel. Reports come back in input order.
    pub fn instrument_all(&self, units: &mut [SourceUnit]) -> Vec<FileReport> {
        let reports: Vec<FileReport> = units
            .par_iter_mut()
            .map(|unit| self.instrument_file(unit))
            .collect();
        tracing::info!(
            files = reports.len(),
            changed = reports.iter().filter(|r| !r.is_unchanged()).count(),
            entry_inserted = self.entry_inserted(),
            "build instrumented"
        );
        reports
    }
}

impl Default for Build {
    fn default() -> Self {
        Self::new(InstrumentConfig::default())
    }
}
