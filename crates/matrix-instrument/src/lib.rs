//! # matrix-instrument
//!
//! Build-time instrumentation of UI source trees. A [`Build`] rewrites each
//! file's typed syntax tree in place:
//!
//! - **lifecycle**: component classes get a log call in `componentDidMount`
//!   and `componentWillUnmount`, synthesizing the hooks when missing;
//! - **interaction**: trackable event-handler attributes on UI elements are
//!   wrapped in a closure that logs before calling the original;
//! - **entry**: the first file in the build that registers the root
//!   component receives the client bootstrap block.
//!
//! The engine never parses source text. Hosts hand over a tree (built with
//! [`ast::TreeBuilder`] or decoded from JSON) and print the result themselves;
//! [`codegen`] offers a reference printer for the supported subset.

pub mod ast;
pub mod classifier;
pub mod codegen;
pub mod rewriter;
pub mod synth;

pub use ast::{Program, SourceUnit};
pub use rewriter::{Build, FileReport};
pub use synth::Synthesizer;
