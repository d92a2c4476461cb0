//! Per-pass visited sets.

use rustc_hash::FxHashSet;

use crate::ast::NodeId;

/// Nodes already handled during one file's rewrite pass.
///
/// `processed` covers classes and elements; `wrapped` covers attributes and
/// their expression containers. Dropped with the pass.
#[derive(Debug, Default)]
pub struct TraversalMarks {
    processed: FxHashSet<NodeId>,
    wrapped: FxHashSet<NodeId>,
}

impl TraversalMarks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` the first time `id` is seen.
    pub fn mark_processed(&mut self, id: NodeId) -> bool {
        self.processed.insert(id)
    }

    pub fn mark_wrapped(&mut self, id: NodeId) {
        self.wrapped.insert(id);
    }

    pub fn is_wrapped(&self, id: NodeId) -> bool {
        self.wrapped.contains(&id)
    }
}
