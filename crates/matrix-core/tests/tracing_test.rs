//! Tests for the standard span macros.

use matrix_core::tracing::spans::names;
use matrix_core::{flush_span, rewrite_span};

#[test]
fn test_span_macros_use_published_names() {
    let rewrite = rewrite_span!("src/screens/Home.js");
    assert_eq!(rewrite.metadata().map(|m| m.name()), Some(names::REWRITE));

    let flush = flush_span!(3usize, "https://collector.test/report");
    assert_eq!(flush.metadata().map(|m| m.name()), Some(names::FLUSH));
}

#[test]
fn test_init_tracing_is_idempotent() {
    matrix_core::tracing::init_tracing();
    matrix_core::tracing::init_tracing();
}
