//! # herald - Synchronous Event Dispatch
//!
//! `herald` broadcasts named events to priority-ordered listeners, gathers
//! their responses and refuses runaway re-entrant dispatch chains.
//!
//! Dispatch is synchronous and re-entrant: a listener receives the
//! dispatcher and may attach, detach or dispatch further events before it
//! returns. The recursion depth of every event name is bounded.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use herald::prelude::*;
//!
//! let dispatcher = EventDispatcher::<&'static str>::new();
//!
//! dispatcher.attach(Listener::new("test", |_, _| Ok(Some("a"))).with_priority(100))?;
//! dispatcher.attach(Listener::new("test", |_, _| Ok(Some("b"))).with_priority(100))?;
//!
//! let responses = dispatcher.collect(&mut Event::new("test"))?;
//! assert_eq!(responses.into_vec(), vec!["a", "b"]);
//! ```
//!
//! ## Dispatch modes
//!
//! - [`EventDispatcher::notify`] broadcasts and discards responses
//! - [`EventDispatcher::ask`] returns the first response
//! - [`EventDispatcher::collect`] returns every response as [`Responses`]
//!
//! ## Features
//!
//! - `tracing` (default): structured logs and [`TracingProcessor`] spans
//! - `macros`: `#[listeners]` / `#[listen]` for declaring aggregates

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use herald_core::{
    // Error types
    BoxError,
    DispatchError,
    // Event
    Event,
    HeraldError,
    // Registration handle
    ListenerId,
    // Response
    Message,
    RegistryError,
    ResponseError,
    Responses,
};

pub use herald_std::{
    // Bulk registration
    AggregateFn,
    // Recursion safety
    CallChains,
    // Listener
    Callback,
    Condition,
    // Dispatch
    DEFAULT_RECURSION_DEPTH_LIMIT,
    DispatcherBuilder,
    DispatcherConfig,
    EventDispatcher,
    // Processing
    EventProcessor,
    Listener,
    ListenerAggregate,
    // Registry
    ListenerCollection,
    ListenerQueue,
    RecursionDepthList,
    RecursionGuard,
    SequentialProcessor,
    TracingProcessor,
    aggregate_fn,
};

/// Testing utilities.
pub mod testing {
    pub use herald_std::testing::{CallCounter, CallLog, RecordingListener};
}

/// Prelude module - common imports for Herald.
///
/// # Usage
///
/// ```rust,ignore
/// use herald::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, DispatchError, Event, EventDispatcher, HeraldError, Listener,
        ListenerAggregate, ListenerId, Message, RegistryError, Responses,
    };
}

#[cfg(feature = "macros")]
pub use herald_macros::{listen, listeners};

#[cfg(all(doctest, feature = "macros"))]
mod misuse;
