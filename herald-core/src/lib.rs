//! # herald-core
//!
//! Core value types for the Herald event dispatch framework.
//!
//! This crate has minimal dependencies and is meant to be imported by
//! components that only build events or inspect responses and errors, without
//! pulling in the dispatch machinery from `herald-std`.
//!
//! # Contents
//!
//! - [`Event`] - the named, stoppable value passed to every listener
//! - [`ListenerId`] - process-unique handle returned on registration
//! - [`Responses`] - ordered responses gathered by a `collect` dispatch
//! - [`Message`] - marker trait for response values
//!
//! # Error Types
//!
//! - [`HeraldError`] - Top-level error type
//! - [`RegistryError`] - Listener registration and lookup errors
//! - [`DispatchError`] - Dispatch errors, including recursion rejection
//! - [`ResponseError`] - Reading from an empty [`Responses`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod event;
mod id;
mod message;
mod response;

// Re-exports
pub use error::{BoxError, DispatchError, HeraldError, RegistryError, ResponseError};
pub use event::Event;
pub use id::ListenerId;
pub use message::Message;
pub use response::Responses;
