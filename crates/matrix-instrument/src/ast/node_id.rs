//! Per-pass node identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of an id-bearing node (class, method, element, attribute,
/// expression container) within one rewrite pass.
///
/// Ids coming from a host are not trusted; [`super::index_nodes`] renumbers
/// the tree at the start of each pass so every id is unique.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic id source. `0` is reserved for "unassigned".
#[derive(Debug, Clone)]
pub struct NodeIdGen {
    next: u32,
}

impl NodeIdGen {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}

impl Default for NodeIdGen {
    fn default() -> Self {
        Self::new()
    }
}
