//! # Event
//!
//! The value handed to every listener during one dispatch call.
//!
//! An event carries a name (used to look up listeners), an optional sender
//! and a bag of named parameters. Listeners read it through a mutable
//! reference; the only mutation they can perform is [`Event::stop`], which
//! short-circuits the rest of the listener chain for the current dispatch.

use std::{
    any::Any,
    collections::HashMap,
    fmt,
    sync::Arc,
};

type Param = Box<dyn Any + Send + Sync>;

/// A named event with optional sender and parameters.
///
/// # Example
///
/// ```rust,ignore
/// let mut event = Event::new("user.created")
///     .with_param("id", 42_u64)
///     .with_param("name", String::from("ada"));
///
/// assert_eq!(event.param::<u64>("id"), Some(&42));
/// event.stop();
/// assert!(event.is_stopped());
/// ```
pub struct Event {
    name: String,
    sender: Option<Arc<dyn Any + Send + Sync>>,
    params: HashMap<String, Param>,
    stopped: bool,
}

impl Event {
    /// Create an event without sender or parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sender: None,
            params: HashMap::new(),
            stopped: false,
        }
    }

    /// Attach the object that triggered the event.
    pub fn with_sender<S: Any + Send + Sync>(mut self, sender: Arc<S>) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Add a named parameter. A second value under the same key replaces the first.
    pub fn with_param<T: Any + Send + Sync>(mut self, key: impl Into<String>, value: T) -> Self {
        self.params.insert(key.into(), Box::new(value));
        self
    }

    /// The event name listeners are registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The sender, if one was attached and it has type `S`.
    pub fn sender<S: Any + Send + Sync>(&self) -> Option<&S> {
        self.sender.as_deref()?.downcast_ref::<S>()
    }

    /// Whether a sender is attached at all.
    pub fn has_sender(&self) -> bool {
        self.sender.is_some()
    }

    /// Whether a parameter with this key exists, regardless of its type.
    pub fn has_param(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Read a parameter. Returns `None` when the key is missing or the
    /// stored value is not a `T`.
    pub fn param<T: Any>(&self, key: &str) -> Option<&T> {
        self.params.get(key)?.downcast_ref::<T>()
    }

    /// Names of all parameters, in no particular order.
    pub fn param_keys(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    /// Number of parameters.
    pub fn params_len(&self) -> usize {
        self.params.len()
    }

    /// Stop propagation to the remaining listeners of the current dispatch.
    ///
    /// Stopping is permanent for this event value.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    /// Whether [`stop`](Self::stop) has been called.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.param_keys().collect();
        keys.sort_unstable();
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("has_sender", &self.has_sender())
            .field("params", &keys)
            .field("stopped", &self.stopped)
            .finish()
    }
}
