//! Testing utilities for Herald.
//!
//! This module provides helpers to make testing listener wiring easier.
//!
//! # Features
//!
//! - [`CallLog`]: a shared log that records which listeners ran, in order
//! - [`RecordingListener`]: a listener builder that writes to a [`CallLog`]
//! - [`CallCounter`]: counts invocations of a listener

use crate::listener::Listener;
use herald_core::Message;
use parking_lot::Mutex;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Call Log
// ============================================================================

/// A shared, clonable record of listener invocations.
///
/// # Example
///
/// ```rust,ignore
/// let log = CallLog::new();
/// dispatcher.attach(log.listener("test", "first").with_priority(10).build())?;
/// dispatcher.attach(log.listener("test", "second").build())?;
///
/// dispatcher.notify(&mut Event::new("test"))?;
/// assert_eq!(log.calls(), vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a listener for `event_name` that records `label` when invoked.
    pub fn listener<R>(&self, event_name: &str, label: &str) -> RecordingListener<R> {
        RecordingListener {
            log: self.clone(),
            event_name: event_name.to_owned(),
            label: label.to_owned(),
            priority: 0,
            response: None,
            stop: false,
        }
    }

    /// Record a label directly.
    pub fn record(&self, label: impl Into<String>) {
        self.calls.lock().push(label.into());
    }

    /// Labels recorded so far, in invocation order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Number of recorded invocations.
    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Whether `label` was recorded at least once.
    pub fn contains(&self, label: &str) -> bool {
        self.calls.lock().iter().any(|call| call == label)
    }

    /// Clear the log.
    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

// ============================================================================
// Recording Listener
// ============================================================================

/// Builder for a listener that records its label, then optionally responds
/// and stops the event.
pub struct RecordingListener<R> {
    log: CallLog,
    event_name: String,
    label: String,
    priority: i32,
    response: Option<R>,
    stop: bool,
}

impl<R: Message + Clone> RecordingListener<R> {
    /// Set the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Respond with `response` on every invocation.
    pub fn responding(mut self, response: R) -> Self {
        self.response = Some(response);
        self
    }

    /// Stop the event after recording.
    pub fn stopping(mut self) -> Self {
        self.stop = true;
        self
    }

    /// Build the listener.
    pub fn build(self) -> Listener<R> {
        let Self {
            log,
            event_name,
            label,
            priority,
            response,
            stop,
        } = self;

        Listener::new(event_name, move |event, _| {
            log.record(label.clone());
            if stop {
                event.stop();
            }
            Ok(response.clone())
        })
        .with_priority(priority)
    }
}

// ============================================================================
// Call Counter
// ============================================================================

/// Counts how often the listeners it builds are invoked.
#[derive(Debug, Clone, Default)]
pub struct CallCounter {
    count: Arc<AtomicUsize>,
}

impl CallCounter {
    /// Create a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener for `event_name` that increments this counter and responds with nothing.
    pub fn listener<R: Message>(&self, event_name: &str) -> Listener<R> {
        let count = Arc::clone(&self.count);
        Listener::new(event_name, move |_, _| {
            count.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        })
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}
