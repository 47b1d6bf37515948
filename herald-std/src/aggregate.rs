//! Bulk listener registration.
//!
//! Components that own several listeners implement [`ListenerAggregate`] and
//! are handed the dispatcher, instead of the host wiring each listener by
//! hand.

use crate::dispatcher::EventDispatcher;
use herald_core::{HeraldError, Message};
use std::sync::Arc;

/// A component that registers its own listeners.
///
/// # Example
///
/// ```rust,ignore
/// struct AccessLog;
///
/// impl ListenerAggregate<()> for AccessLog {
///     fn attach_listeners(&self, dispatcher: &EventDispatcher<()>) -> Result<(), HeraldError> {
///         dispatcher.attach(Listener::new("request", |_, _| Ok(None)))?;
///         dispatcher.attach(Listener::new("response", |_, _| Ok(None)))?;
///         Ok(())
///     }
/// }
///
/// dispatcher.attach_aggregate(&AccessLog)?;
/// ```
pub trait ListenerAggregate<R: Message> {
    /// Attach every listener of this component to `dispatcher`.
    fn attach_listeners(&self, dispatcher: &EventDispatcher<R>) -> Result<(), HeraldError>;
}

impl<R: Message, A: ListenerAggregate<R> + ?Sized> ListenerAggregate<R> for Box<A> {
    fn attach_listeners(&self, dispatcher: &EventDispatcher<R>) -> Result<(), HeraldError> {
        (**self).attach_listeners(dispatcher)
    }
}

impl<R: Message, A: ListenerAggregate<R> + ?Sized> ListenerAggregate<R> for Arc<A> {
    fn attach_listeners(&self, dispatcher: &EventDispatcher<R>) -> Result<(), HeraldError> {
        (**self).attach_listeners(dispatcher)
    }
}

/// Adapts a closure into a [`ListenerAggregate`].
#[derive(Debug, Clone, Copy)]
pub struct AggregateFn<F>(F);

/// Wrap `f` so it can be passed to
/// [`EventDispatcher::attach_aggregate`].
pub fn aggregate_fn<R, F>(f: F) -> AggregateFn<F>
where
    R: Message,
    F: Fn(&EventDispatcher<R>) -> Result<(), HeraldError>,
{
    AggregateFn(f)
}

impl<R, F> ListenerAggregate<R> for AggregateFn<F>
where
    R: Message,
    F: Fn(&EventDispatcher<R>) -> Result<(), HeraldError>,
{
    fn attach_listeners(&self, dispatcher: &EventDispatcher<R>) -> Result<(), HeraldError> {
        (self.0)(dispatcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::Listener;
    use herald_core::{Event, RegistryError};

    struct Greeter {
        greeting: &'static str,
    }

    impl ListenerAggregate<String> for Greeter {
        fn attach_listeners(&self, dispatcher: &EventDispatcher<String>) -> Result<(), HeraldError> {
            let greeting = self.greeting;
            dispatcher.attach(Listener::new("hello", move |_, _| Ok(Some(greeting.to_string()))))?;
            dispatcher.attach(
                Listener::new("bye", |_, _| Ok(Some("bye".to_string()))).with_priority(-1),
            )?;
            Ok(())
        }
    }

    #[test]
    fn test_aggregate_registers_all() {
        let dispatcher: EventDispatcher<String> = EventDispatcher::new();
        dispatcher
            .attach_aggregate(&Greeter { greeting: "hi" })
            .unwrap();

        assert!(dispatcher.has_listeners("hello"));
        assert!(dispatcher.has_listeners("bye"));
        assert_eq!(
            dispatcher.ask(&mut Event::new("hello")).unwrap().as_deref(),
            Some("hi")
        );
    }

    #[test]
    fn test_boxed_and_shared_aggregates() {
        let dispatcher: EventDispatcher<String> = EventDispatcher::new();
        let boxed: Box<dyn ListenerAggregate<String>> = Box::new(Greeter { greeting: "a" });
        let shared = Arc::new(Greeter { greeting: "b" });

        dispatcher.attach_aggregate(&boxed).unwrap();
        dispatcher.attach_aggregate(&shared).unwrap();

        let responses = dispatcher.collect(&mut Event::new("hello")).unwrap();
        assert_eq!(responses.into_vec(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_closure_aggregate_propagates_errors() {
        let dispatcher: EventDispatcher<()> = EventDispatcher::new();
        let broken = aggregate_fn(|dispatcher: &EventDispatcher<()>| {
            dispatcher.attach(Listener::new("", |_, _| Ok(None)))?;
            Ok(())
        });

        let err = dispatcher.attach_aggregate(&broken).unwrap_err();
        assert!(matches!(
            err,
            HeraldError::Registry(RegistryError::InvalidEventName)
        ));
        assert_eq!(dispatcher.listener_count(), 0);
    }
}
