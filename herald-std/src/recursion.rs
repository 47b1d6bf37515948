//! Per-event recursion depth tracking.
//!
//! A listener may dispatch further events, including the one it is handling.
//! [`RecursionDepthList`] counts how many dispatches of each event name are
//! currently on one call stack, [`CallChains`] keeps one such list per
//! calling thread, and [`RecursionGuard`] ties one increment to one
//! decrement for the lifetime of a dispatch.

use herald_core::DispatchError;
use parking_lot::Mutex;
use std::{
    collections::HashMap,
    thread::{self, ThreadId},
};

/// Depth limit used when none is configured.
pub const DEFAULT_RECURSION_DEPTH_LIMIT: usize = 256;

/// Nesting depth per event name, bounded by a fixed limit.
///
/// Entries are created lazily and never deleted; an idle event sits at 0.
#[derive(Debug, Clone)]
pub struct RecursionDepthList {
    container: HashMap<String, usize>,
    limit: usize,
}

impl RecursionDepthList {
    /// Create a list rejecting dispatch once `limit` nested dispatches of
    /// the same event are in flight. A limit of 0 rejects every dispatch.
    pub fn new(limit: usize) -> Self {
        Self {
            container: HashMap::new(),
            limit,
        }
    }

    /// The configured limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Start tracking `name` at depth 0. Does nothing if already tracked.
    pub fn add_event(&mut self, name: &str) {
        if !self.container.contains_key(name) {
            self.container.insert(name.to_owned(), 0);
        }
    }

    /// Whether `name` has been seen.
    pub fn is_tracked(&self, name: &str) -> bool {
        self.container.contains_key(name)
    }

    /// Current depth; 0 for untracked names.
    pub fn recursion_depth(&self, name: &str) -> usize {
        self.container.get(name).copied().unwrap_or(0)
    }

    /// Whether another dispatch of `name` would exceed the limit.
    pub fn is_depth_limit_reached(&self, name: &str) -> bool {
        self.recursion_depth(name) >= self.limit
    }

    /// Increment the depth of `name`.
    pub fn increase_depth(&mut self, name: &str) {
        self.add_event(name);
        if let Some(depth) = self.container.get_mut(name) {
            *depth += 1;
        }
    }

    /// Decrement the depth of `name`, never below 0.
    pub fn decrease_depth(&mut self, name: &str) {
        if let Some(depth) = self.container.get_mut(name) {
            *depth = depth.saturating_sub(1);
        }
    }

    /// Whether every tracked event is back at depth 0.
    pub fn is_idle(&self) -> bool {
        self.container.values().all(|depth| *depth == 0)
    }
}

impl Default for RecursionDepthList {
    fn default() -> Self {
        Self::new(DEFAULT_RECURSION_DEPTH_LIMIT)
    }
}

/// Recursion depth lists keyed by the thread running the dispatch.
///
/// Nesting only happens on one call stack: a dispatch of `"work"` on one
/// thread is not inside a dispatch of `"work"` running on another. Each
/// thread therefore gets its own [`RecursionDepthList`], created on its first
/// dispatch and dropped again once all of its dispatches have returned.
#[derive(Debug)]
pub struct CallChains {
    limit: usize,
    chains: HashMap<ThreadId, RecursionDepthList>,
}

impl CallChains {
    /// Create an empty set of chains, each bounded by `limit`.
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            chains: HashMap::new(),
        }
    }

    /// The per-chain limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Depth of `name` on the calling thread.
    pub fn recursion_depth(&self, name: &str) -> usize {
        self.depth_on(thread::current().id(), name)
    }

    /// Depth of `name` on `thread`.
    pub fn depth_on(&self, thread: ThreadId, name: &str) -> usize {
        self.chains
            .get(&thread)
            .map_or(0, |list| list.recursion_depth(name))
    }

    /// Number of threads with a dispatch in flight.
    pub fn active_chains(&self) -> usize {
        self.chains.len()
    }

    fn enter(&mut self, thread: ThreadId, name: &str) -> Result<(), DispatchError> {
        let limit = self.limit;
        let list = self
            .chains
            .entry(thread)
            .or_insert_with(|| RecursionDepthList::new(limit));

        if list.is_depth_limit_reached(name) {
            if list.is_idle() {
                self.chains.remove(&thread);
            }
            return Err(DispatchError::MaxRecursionDepthReached {
                event: name.to_owned(),
                limit,
            });
        }
        list.increase_depth(name);
        Ok(())
    }

    fn leave(&mut self, thread: ThreadId, name: &str) {
        if let Some(list) = self.chains.get_mut(&thread) {
            list.decrease_depth(name);
            if list.is_idle() {
                self.chains.remove(&thread);
            }
        }
    }
}

impl Default for CallChains {
    fn default() -> Self {
        Self::new(DEFAULT_RECURSION_DEPTH_LIMIT)
    }
}

/// Scoped depth increment for one dispatch.
///
/// Created by [`enter`](Self::enter) and released on drop, so the depth is
/// restored whether the dispatch returns normally, bails out with `?`, or
/// unwinds from a panicking listener. The lock is held only while the
/// counter changes, never while listeners run.
#[must_use = "the depth is released as soon as the guard is dropped"]
#[derive(Debug)]
pub struct RecursionGuard<'a> {
    chains: &'a Mutex<CallChains>,
    thread: ThreadId,
    name: String,
}

impl<'a> RecursionGuard<'a> {
    /// Check the calling thread's limit for `name` and, if there is room,
    /// take one level.
    pub fn enter(chains: &'a Mutex<CallChains>, name: &str) -> Result<Self, DispatchError> {
        let thread = thread::current().id();
        chains.lock().enter(thread, name)?;
        Ok(Self {
            chains,
            thread,
            name: name.to_owned(),
        })
    }
}

impl Drop for RecursionGuard<'_> {
    fn drop(&mut self) {
        self.chains.lock().leave(self.thread, &self.name);
    }
}
