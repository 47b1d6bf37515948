//! Listener registry keyed by id and grouped per event name.

use crate::{listener::Listener, queue::ListenerQueue};
use herald_core::{ListenerId, Message, RegistryError};
use std::{collections::HashMap, sync::Arc};

/// Owns every registered listener.
///
/// Each listener is stored once by id and referenced from exactly one
/// [`ListenerQueue`], the one for its event name. Both maps are updated
/// together; a queue that becomes empty is dropped, so
/// [`has_listeners`](Self::has_listeners) and
/// [`get_listeners`](Self::get_listeners) treat "never registered" and
/// "all removed" the same way.
pub struct ListenerCollection<R: Message> {
    queues: HashMap<String, ListenerQueue<ListenerId>>,
    listeners: HashMap<ListenerId, Arc<Listener<R>>>,
}

impl<R: Message> ListenerCollection<R> {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self {
            queues: HashMap::new(),
            listeners: HashMap::new(),
        }
    }

    /// Register `listener` with `priority`, which replaces the listener's own.
    pub fn add(&mut self, listener: Listener<R>, priority: i32) -> Result<ListenerId, RegistryError> {
        if listener.event_name().is_empty() {
            return Err(RegistryError::InvalidEventName);
        }

        let listener = listener.with_priority(priority);
        let id = ListenerId::next();
        self.queues
            .entry(listener.event_name().to_owned())
            .or_default()
            .insert(id, priority);
        self.listeners.insert(id, Arc::new(listener));
        Ok(id)
    }

    /// Look up a listener by id.
    pub fn get(&self, id: ListenerId) -> Result<Arc<Listener<R>>, RegistryError> {
        self.listeners
            .get(&id)
            .cloned()
            .ok_or(RegistryError::ListenerNotAvailable(id))
    }

    /// Whether `id` is currently registered.
    pub fn has(&self, id: ListenerId) -> bool {
        self.listeners.contains_key(&id)
    }

    /// Whether at least one listener is registered for `event_name`.
    pub fn has_listeners(&self, event_name: &str) -> bool {
        self.queues.contains_key(event_name)
    }

    /// Unregister a listener, returning it.
    pub fn remove(&mut self, id: ListenerId) -> Result<Arc<Listener<R>>, RegistryError> {
        let listener = self
            .listeners
            .remove(&id)
            .ok_or(RegistryError::ListenerNotAvailable(id))?;

        if let Some(queue) = self.queues.get_mut(listener.event_name()) {
            queue.retain(|queued| *queued != id);
            if queue.is_empty() {
                self.queues.remove(listener.event_name());
            }
        }
        Ok(listener)
    }

    /// Listeners for `event_name`, highest priority first, FIFO on ties.
    pub fn get_listeners(&self, event_name: &str) -> Result<Vec<Arc<Listener<R>>>, RegistryError> {
        let queue = self
            .queues
            .get(event_name)
            .ok_or_else(|| RegistryError::ListenersNotAvailable(event_name.to_owned()))?;

        Ok(queue
            .iter()
            .filter_map(|id| self.listeners.get(id).cloned())
            .collect())
    }

    /// Event names with at least one listener, in no particular order.
    pub fn event_names(&self) -> impl Iterator<Item = &str> {
        self.queues.keys().map(String::as_str)
    }

    /// Total number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<R: Message> Default for ListenerCollection<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(event: &str, tag: &'static str) -> Listener<&'static str> {
        Listener::new(event, move |_, _| Ok(Some(tag)))
    }

    fn priorities(collection: &ListenerCollection<&'static str>, event: &str) -> Vec<i32> {
        collection
            .get_listeners(event)
            .unwrap()
            .iter()
            .map(|l| l.priority())
            .collect()
    }

    #[test]
    fn test_ordering_by_priority_then_registration() {
        let mut collection = ListenerCollection::new();
        let p3 = collection.add(named("test", "p3"), 50).unwrap();
        let p1 = collection.add(named("test", "p1"), 100).unwrap();
        let p4 = collection.add(named("test", "p4"), 0).unwrap();
        let p3b = collection.add(named("test", "p3b"), 50).unwrap();

        let ids: Vec<ListenerId> = collection
            .get_listeners("test")
            .unwrap()
            .iter()
            .map(|l| {
                [p1, p3, p3b, p4]
                    .into_iter()
                    .find(|id| Arc::ptr_eq(&collection.get(*id).unwrap(), l))
                    .unwrap()
            })
            .collect();
        assert_eq!(ids, vec![p1, p3, p3b, p4]);
        assert_eq!(priorities(&collection, "test"), vec![100, 50, 50, 0]);
    }

    #[test]
    fn test_add_overrides_listener_priority() {
        let mut collection = ListenerCollection::new();
        let id = collection
            .add(named("test", "x").with_priority(5), 42)
            .unwrap();
        assert_eq!(collection.get(id).unwrap().priority(), 42);
    }

    #[test]
    fn test_empty_event_name_rejected() {
        let mut collection = ListenerCollection::new();
        assert_eq!(
            collection.add(named("", "x"), 0),
            Err(RegistryError::InvalidEventName)
        );
        assert!(collection.is_empty());
    }

    #[test]
    fn test_remove_twice_fails() {
        let mut collection = ListenerCollection::new();
        let id = collection.add(named("test", "x"), 0).unwrap();

        assert!(collection.remove(id).is_ok());
        assert!(!collection.has(id));
        assert_eq!(
            collection.remove(id).map(|_| ()),
            Err(RegistryError::ListenerNotAvailable(id))
        );
        assert_eq!(
            collection.get(id).map(|_| ()),
            Err(RegistryError::ListenerNotAvailable(id))
        );
    }

    #[test]
    fn test_removing_last_listener_prunes_queue() {
        let mut collection = ListenerCollection::new();
        let a = collection.add(named("test", "a"), 0).unwrap();
        let b = collection.add(named("test", "b"), 0).unwrap();

        collection.remove(a).unwrap();
        assert!(collection.has_listeners("test"));
        assert_eq!(collection.get_listeners("test").unwrap().len(), 1);

        collection.remove(b).unwrap();
        assert!(!collection.has_listeners("test"));
        assert_eq!(
            collection.get_listeners("test").map(|l| l.len()),
            Err(RegistryError::ListenersNotAvailable("test".into()))
        );
        assert_eq!(collection.event_names().count(), 0);
    }

    #[test]
    fn test_unknown_event_has_no_listeners() {
        let collection: ListenerCollection<()> = ListenerCollection::new();
        assert!(!collection.has_listeners("nothing"));
        assert!(matches!(
            collection.get_listeners("nothing"),
            Err(RegistryError::ListenersNotAvailable(name)) if name == "nothing"
        ));
    }

    #[test]
    fn test_events_are_isolated() {
        let mut collection = ListenerCollection::new();
        collection.add(named("a", "1"), 0).unwrap();
        collection.add(named("b", "2"), 0).unwrap();
        collection.add(named("b", "3"), 0).unwrap();

        assert_eq!(collection.len(), 3);
        assert_eq!(collection.get_listeners("a").unwrap().len(), 1);
        assert_eq!(collection.get_listeners("b").unwrap().len(), 2);
        let mut names: Vec<&str> = collection.event_names().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["a", "b"]);
    }
}
