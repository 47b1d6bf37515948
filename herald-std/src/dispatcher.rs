//! # Event dispatcher
//!
//! The facade tying the registry, the recursion guard and the processor
//! together. Every dispatch goes through the same steps:
//!
//! 1. reject the call if the event's recursion limit is reached on the
//!    calling thread;
//! 2. take one level of depth for the event name;
//! 3. snapshot the ordered listeners (none registered means none to run);
//! 4. hand them to the [`EventProcessor`];
//! 5. release the depth level, whatever the outcome.
//!
//! No internal lock is held while a listener runs, so callbacks may attach,
//! detach and dispatch through the dispatcher they receive.

use crate::{
    aggregate::ListenerAggregate,
    collection::ListenerCollection,
    listener::Listener,
    processor::{EventProcessor, SequentialProcessor},
    recursion::{CallChains, DEFAULT_RECURSION_DEPTH_LIMIT, RecursionGuard},
};
use herald_core::{
    DispatchError, Event, HeraldError, ListenerId, Message, RegistryError, Responses,
};
use parking_lot::Mutex;
use std::{fmt, sync::Arc};

/// Tunables for an [`EventDispatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Maximum number of nested dispatches of one event name.
    pub recursion_depth_limit: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            recursion_depth_limit: DEFAULT_RECURSION_DEPTH_LIMIT,
        }
    }
}

impl DispatcherConfig {
    /// Set the recursion depth limit.
    pub fn with_recursion_depth_limit(mut self, limit: usize) -> Self {
        self.recursion_depth_limit = limit;
        self
    }
}

/// Registers listeners and dispatches events to them.
///
/// `R` is the response type listeners produce; use `()` when only
/// [`notify`](Self::notify) is needed.
///
/// # Example
///
/// ```rust,ignore
/// let dispatcher = EventDispatcher::<String>::new();
/// dispatcher.attach(Listener::new("greet", |event, _| {
///     Ok(Some(format!("hello, {}", event.param::<String>("who").unwrap())))
/// }))?;
///
/// let mut event = Event::new("greet").with_param("who", "ada".to_string());
/// assert_eq!(dispatcher.ask(&mut event)?.as_deref(), Some("hello, ada"));
/// ```
pub struct EventDispatcher<R: Message = ()> {
    listeners: Mutex<ListenerCollection<R>>,
    depths: Mutex<CallChains>,
    processor: Box<dyn EventProcessor<R>>,
    config: DispatcherConfig,
}

impl<R: Message> EventDispatcher<R> {
    /// A dispatcher with the default configuration and sequential processing.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// A dispatcher with the given configuration and sequential processing.
    pub fn with_config(config: DispatcherConfig) -> Self {
        Self::builder().config(config).build()
    }

    /// Start building a dispatcher.
    pub fn builder() -> DispatcherBuilder<R> {
        DispatcherBuilder::new()
    }

    /// The configuration this dispatcher was built with.
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Register a listener under its own event name and priority.
    pub fn attach(&self, listener: Listener<R>) -> Result<ListenerId, RegistryError> {
        let priority = listener.priority();
        #[cfg(feature = "tracing")]
        let event_name = listener.event_name().to_owned();

        let id = self.listeners.lock().add(listener, priority)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(listener = %id, event = %event_name, priority, "listener attached");
        Ok(id)
    }

    /// Let `aggregate` register its listeners on this dispatcher.
    pub fn attach_aggregate<A>(&self, aggregate: &A) -> Result<(), HeraldError>
    where
        A: ListenerAggregate<R> + ?Sized,
    {
        aggregate.attach_listeners(self)
    }

    /// Unregister a listener.
    pub fn detach(&self, id: ListenerId) -> Result<(), RegistryError> {
        #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
        let removed = self.listeners.lock().remove(id)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(listener = %id, event = %removed.event_name(), "listener detached");
        Ok(())
    }

    /// Look up a registered listener.
    pub fn listener(&self, id: ListenerId) -> Result<Arc<Listener<R>>, RegistryError> {
        self.listeners.lock().get(id)
    }

    /// Whether `id` is registered.
    pub fn has_listener(&self, id: ListenerId) -> bool {
        self.listeners.lock().has(id)
    }

    /// Whether any listener is registered for `event_name`.
    pub fn has_listeners(&self, event_name: &str) -> bool {
        self.listeners.lock().has_listeners(event_name)
    }

    /// Ordered listeners for `event_name`.
    ///
    /// Fails with [`RegistryError::ListenersNotAvailable`] if there are none;
    /// dispatching such an event is not an error.
    pub fn listeners(&self, event_name: &str) -> Result<Vec<Arc<Listener<R>>>, RegistryError> {
        self.listeners.lock().get_listeners(event_name)
    }

    /// Total number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }

    /// Current nesting depth of `event_name` on the calling thread (0 when idle).
    ///
    /// Dispatches running on other threads are not nested in this one and do
    /// not count.
    pub fn recursion_depth(&self, event_name: &str) -> usize {
        self.depths.lock().recursion_depth(event_name)
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    /// Broadcast `event`, discarding responses. Returns `self` for chaining.
    pub fn notify(&self, event: &mut Event) -> Result<&Self, DispatchError> {
        self.dispatch(event)?;
        Ok(self)
    }

    /// Dispatch `event` and return the first response, if any.
    pub fn ask(&self, event: &mut Event) -> Result<Option<R>, DispatchError> {
        Ok(self.dispatch(event)?.into_iter().next())
    }

    /// Dispatch `event` and return every response in listener order.
    pub fn collect(&self, event: &mut Event) -> Result<Responses<R>, DispatchError> {
        self.dispatch(event).map(Responses::from)
    }

    fn dispatch(&self, event: &mut Event) -> Result<Vec<R>, DispatchError> {
        let _guard = match RecursionGuard::enter(&self.depths, event.name()) {
            Ok(guard) => guard,
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(event = %event.name(), error = %err, "dispatch rejected");
                return Err(err);
            }
        };

        let listeners = self
            .listeners
            .lock()
            .get_listeners(event.name())
            .unwrap_or_default();

        #[cfg(feature = "tracing")]
        tracing::trace!(
            event = %event.name(),
            listeners = listeners.len(),
            depth = self.recursion_depth(event.name()),
            "dispatching event"
        );

        self.processor.process(self, event, &listeners)
    }
}

impl<R: Message> Default for EventDispatcher<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Message> fmt::Debug for EventDispatcher<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("listeners", &self.listener_count())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for [`EventDispatcher`].
///
/// # Example
///
/// ```rust,ignore
/// let dispatcher = EventDispatcher::<()>::builder()
///     .recursion_depth_limit(8)
///     .processor(TracingProcessor::new(SequentialProcessor, "app"))
///     .build();
/// ```
pub struct DispatcherBuilder<R: Message> {
    config: DispatcherConfig,
    processor: Option<Box<dyn EventProcessor<R>>>,
}

impl<R: Message> DispatcherBuilder<R> {
    /// Start from the default configuration.
    pub fn new() -> Self {
        Self {
            config: DispatcherConfig::default(),
            processor: None,
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: DispatcherConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the recursion depth limit.
    pub fn recursion_depth_limit(mut self, limit: usize) -> Self {
        self.config.recursion_depth_limit = limit;
        self
    }

    /// Use a custom processor instead of [`SequentialProcessor`].
    pub fn processor<P: EventProcessor<R> + 'static>(mut self, processor: P) -> Self {
        self.processor = Some(Box::new(processor));
        self
    }

    /// Build the dispatcher.
    pub fn build(self) -> EventDispatcher<R> {
        EventDispatcher {
            listeners: Mutex::new(ListenerCollection::new()),
            depths: Mutex::new(CallChains::new(self.config.recursion_depth_limit)),
            processor: self
                .processor
                .unwrap_or_else(|| Box::new(SequentialProcessor)),
            config: self.config,
        }
    }
}

impl<R: Message> Default for DispatcherBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}
