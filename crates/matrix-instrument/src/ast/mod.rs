//! Typed UI-source tree: node model, identity, construction, traversal.

pub mod builder;
pub mod node_id;
pub mod types;
pub mod visit;

pub use builder::TreeBuilder;
pub use node_id::{NodeId, NodeIdGen};
pub use types::*;
pub use visit::{collect_jsx_text, index_nodes, walk_program, VisitMut};
