//! # Listener
//!
//! A listener binds a callback to an event name, with a priority that orders
//! it against other listeners of the same event and an optional condition
//! that decides per event whether the callback runs at all.
//!
//! Listeners are immutable once registered. The collection hands out
//! `Arc<Listener<R>>` snapshots, so a dispatch in progress is unaffected by
//! listeners attached or detached from inside a callback.

use crate::dispatcher::EventDispatcher;
use herald_core::{BoxError, Event, Message};
use std::{fmt, sync::Arc};

/// Signature of a listener body.
///
/// Returning `Ok(None)` means "no contribution"; `Ok(Some(r))` adds `r` to the
/// responses of `ask`/`collect`. An `Err` aborts the whole dispatch.
pub type Callback<R> =
    dyn Fn(&mut Event, &EventDispatcher<R>) -> Result<Option<R>, BoxError> + Send + Sync;

/// Guard predicate evaluated before a listener is invoked.
pub type Condition = dyn Fn(&Event) -> bool + Send + Sync;

/// A callback registered for one event name.
///
/// # Example
///
/// ```rust,ignore
/// let listener = Listener::new("request", |event, _dispatcher| {
///     Ok(Some(format!("handled {}", event.name())))
/// })
/// .with_priority(10)
/// .with_condition(|event| event.has_param("path"));
/// ```
pub struct Listener<R: Message> {
    event_name: String,
    callback: Arc<Callback<R>>,
    priority: i32,
    condition: Option<Arc<Condition>>,
}

impl<R: Message> Listener<R> {
    /// Create a listener with priority 0 and no condition.
    pub fn new<F>(event_name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&mut Event, &EventDispatcher<R>) -> Result<Option<R>, BoxError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            event_name: event_name.into(),
            callback: Arc::new(callback),
            priority: 0,
            condition: None,
        }
    }

    /// Set the priority. Higher values run first.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Only invoke the callback for events matching `condition`.
    pub fn with_condition<F>(mut self, condition: F) -> Self
    where
        F: Fn(&Event) -> bool + Send + Sync + 'static,
    {
        self.condition = Some(Arc::new(condition));
        self
    }

    /// The event name this listener is registered under.
    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    /// The priority (higher runs first).
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Whether a condition is attached.
    pub fn has_condition(&self) -> bool {
        self.condition.is_some()
    }

    /// Evaluate the condition. Listeners without one accept every event.
    pub fn accepts(&self, event: &Event) -> bool {
        self.condition.as_ref().is_none_or(|condition| condition(event))
    }

    /// Run the callback.
    pub fn invoke(
        &self,
        event: &mut Event,
        dispatcher: &EventDispatcher<R>,
    ) -> Result<Option<R>, BoxError> {
        (self.callback)(event, dispatcher)
    }
}

impl<R: Message> Clone for Listener<R> {
    fn clone(&self) -> Self {
        Self {
            event_name: self.event_name.clone(),
            callback: Arc::clone(&self.callback),
            priority: self.priority,
            condition: self.condition.clone(),
        }
    }
}

impl<R: Message> fmt::Debug for Listener<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("event_name", &self.event_name)
            .field("priority", &self.priority)
            .field("has_condition", &self.has_condition())
            .finish_non_exhaustive()
    }
}
