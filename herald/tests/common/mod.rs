#![allow(dead_code)]

use herald::{EventDispatcher, Listener, Message};
use std::sync::Once;

// ============================================================================
// Shared fixtures
// ============================================================================

static TRACING: Once = Once::new();

/// Install a test-writer subscriber once per test binary.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// A listener that always responds with `response`.
pub fn responder<R: Message + Clone>(event: &str, response: R, priority: i32) -> Listener<R> {
    Listener::new(event, move |_, _| Ok(Some(response.clone()))).with_priority(priority)
}

/// A dispatcher with the given recursion limit.
pub fn limited<R: Message>(limit: usize) -> EventDispatcher<R> {
    init_tracing();
    EventDispatcher::builder()
        .recursion_depth_limit(limit)
        .build()
}
