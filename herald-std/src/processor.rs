//! Listener invocation strategies.
//!
//! The dispatcher resolves the ordered listener list and hands it to an
//! [`EventProcessor`], which decides how the listeners are run and how their
//! outputs are gathered. This keeps the execution model pluggable.

use crate::{dispatcher::EventDispatcher, listener::Listener};
use herald_core::{DispatchError, Event, Message};
use std::sync::Arc;

/// Strategy for running a resolved set of listeners against an event.
pub trait EventProcessor<R: Message>: Send + Sync {
    /// Run `listeners` (already in priority order) and return their responses.
    fn process(
        &self,
        dispatcher: &EventDispatcher<R>,
        event: &mut Event,
        listeners: &[Arc<Listener<R>>],
    ) -> Result<Vec<R>, DispatchError>;
}

impl<R: Message, P: EventProcessor<R> + ?Sized> EventProcessor<R> for Box<P> {
    fn process(
        &self,
        dispatcher: &EventDispatcher<R>,
        event: &mut Event,
        listeners: &[Arc<Listener<R>>],
    ) -> Result<Vec<R>, DispatchError> {
        (**self).process(dispatcher, event, listeners)
    }
}

impl<R: Message, P: EventProcessor<R> + ?Sized> EventProcessor<R> for Arc<P> {
    fn process(
        &self,
        dispatcher: &EventDispatcher<R>,
        event: &mut Event,
        listeners: &[Arc<Listener<R>>],
    ) -> Result<Vec<R>, DispatchError> {
        (**self).process(dispatcher, event, listeners)
    }
}

/// Runs listeners one by one in priority order.
///
/// For each listener:
/// 1. if the event is already stopped, processing ends;
/// 2. if the listener's condition rejects the event, it is skipped;
/// 3. the callback runs and a `Some` response is kept;
/// 4. if the callback stopped the event, processing ends.
///
/// A failing callback aborts the loop; its error is returned as
/// [`DispatchError::Listener`] and later listeners do not run.
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialProcessor;

impl<R: Message> EventProcessor<R> for SequentialProcessor {
    fn process(
        &self,
        dispatcher: &EventDispatcher<R>,
        event: &mut Event,
        listeners: &[Arc<Listener<R>>],
    ) -> Result<Vec<R>, DispatchError> {
        let mut responses = Vec::new();
        for listener in listeners {
            if event.is_stopped() {
                break;
            }
            if !listener.accepts(event) {
                #[cfg(feature = "tracing")]
                tracing::trace!(
                    event = %event.name(),
                    priority = listener.priority(),
                    "listener skipped by condition"
                );
                continue;
            }

            #[cfg(feature = "tracing")]
            tracing::trace!(
                event = %event.name(),
                priority = listener.priority(),
                "invoking listener"
            );
            if let Some(response) = listener
                .invoke(event, dispatcher)
                .map_err(DispatchError::Listener)?
            {
                responses.push(response);
            }

            if event.is_stopped() {
                #[cfg(feature = "tracing")]
                tracing::trace!(event = %event.name(), "event stopped");
                break;
            }
        }
        Ok(responses)
    }
}

/// Wraps another processor in a `tracing` span per dispatch.
///
/// Without the `tracing` feature this is a transparent pass-through.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProcessor<P> {
    inner: P,
    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    name: &'static str,
}

impl<P> TracingProcessor<P> {
    /// Wrap `inner`; `name` is recorded on every span.
    pub const fn new(inner: P, name: &'static str) -> Self {
        Self { inner, name }
    }

    /// The wrapped processor.
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<R, P> EventProcessor<R> for TracingProcessor<P>
where
    R: Message,
    P: EventProcessor<R>,
{
    #[cfg(feature = "tracing")]
    fn process(
        &self,
        dispatcher: &EventDispatcher<R>,
        event: &mut Event,
        listeners: &[Arc<Listener<R>>],
    ) -> Result<Vec<R>, DispatchError> {
        let span = tracing::info_span!(
            "event_dispatch",
            processor = %self.name,
            event = %event.name(),
            listeners = listeners.len(),
        );
        let _entered = span.enter();

        let result = self.inner.process(dispatcher, event, listeners);
        match &result {
            Ok(responses) => tracing::debug!(
                responses = responses.len(),
                stopped = event.is_stopped(),
                "dispatch finished"
            ),
            Err(err) => tracing::debug!(error = %err, label = err.as_label(), "dispatch failed"),
        }
        result
    }

    #[cfg(not(feature = "tracing"))]
    fn process(
        &self,
        dispatcher: &EventDispatcher<R>,
        event: &mut Event,
        listeners: &[Arc<Listener<R>>],
    ) -> Result<Vec<R>, DispatchError> {
        self.inner.process(dispatcher, event, listeners)
    }
}
