//! # herald-std
//!
//! Standard dispatch machinery for the Herald event dispatch framework.
//!
//! This crate provides:
//! - **Registry**: [`ListenerQueue`] and [`ListenerCollection`], ordering
//!   listeners by priority with FIFO ties
//! - **Recursion safety**: [`RecursionDepthList`], [`CallChains`] and
//!   [`RecursionGuard`]
//! - **Processing**: [`EventProcessor`], [`SequentialProcessor`], [`TracingProcessor`]
//! - **Dispatch**: [`EventDispatcher`] with `notify`, `ask` and `collect`
//! - **Bulk registration**: [`ListenerAggregate`]
//! - **Testing helpers**: [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core types
pub use herald_core;

// Modules
pub mod aggregate;
pub mod collection;
pub mod dispatcher;
pub mod listener;
pub mod processor;
pub mod queue;
pub mod recursion;
pub mod testing;

pub use aggregate::{AggregateFn, ListenerAggregate, aggregate_fn};
pub use collection::ListenerCollection;
pub use dispatcher::{DispatcherBuilder, DispatcherConfig, EventDispatcher};
pub use listener::{Callback, Condition, Listener};
pub use processor::{EventProcessor, SequentialProcessor, TracingProcessor};
pub use queue::ListenerQueue;
pub use recursion::{
    CallChains, DEFAULT_RECURSION_DEPTH_LIMIT, RecursionDepthList, RecursionGuard,
};
