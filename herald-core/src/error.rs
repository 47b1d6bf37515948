//! Error types for Herald.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`HeraldError`] - Top-level error type for all Herald operations
//! - [`RegistryError`] - Errors from listener registration and lookup
//! - [`DispatchError`] - Errors during event dispatch
//! - [`ResponseError`] - Errors from reading collected responses

use crate::id::ListenerId;
use std::error::Error as StdError;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Top-level error type for all Herald operations.
#[derive(Error, Debug)]
pub enum HeraldError {
    /// An error occurred while registering or looking up listeners.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// An error occurred during event dispatch.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// An error occurred while reading responses.
    #[error("response error: {0}")]
    Response(#[from] ResponseError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors raised by the listener registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No listener is registered under the given id.
    #[error("listener {0} is not available")]
    ListenerNotAvailable(ListenerId),

    /// No listeners are registered for the given event name.
    #[error("no listeners available for event `{0}`")]
    ListenersNotAvailable(String),

    /// Event names must not be empty.
    #[error("event name must not be empty")]
    InvalidEventName,
}

/// Errors that can occur during event dispatch.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The event is already being dispatched `limit` times further up the stack.
    #[error("maximum recursion depth {limit} reached for event `{event}`")]
    MaxRecursionDepthReached {
        /// Name of the rejected event.
        event: String,
        /// Configured depth limit.
        limit: usize,
    },

    /// A listener callback failed; the dispatch was aborted.
    #[error("listener failed")]
    Listener(#[source] BoxError),
}

impl DispatchError {
    /// Returns `true` if this error, or any dispatch error nested inside a
    /// failing listener, is a recursion limit rejection.
    ///
    /// A listener that re-dispatches and propagates the failure with `?`
    /// wraps the inner [`DispatchError`] once per enclosing dispatch, so the
    /// check follows the chain down.
    pub fn is_max_recursion_depth(&self) -> bool {
        let mut current: &(dyn StdError + 'static) = self;
        loop {
            if let Some(DispatchError::MaxRecursionDepthReached { .. }) =
                current.downcast_ref::<DispatchError>()
            {
                return true;
            }
            match current.source() {
                Some(next) => current = next,
                None => return false,
            }
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            DispatchError::MaxRecursionDepthReached { .. } => "max_recursion_depth_reached",
            DispatchError::Listener(_) => "listener_failed",
        }
    }
}

/// Errors from reading a [`Responses`](crate::Responses) collection.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseError {
    /// The collection holds no responses.
    #[error("no response available")]
    ResponseNotAvailable,
}

// Convenience conversions
impl From<BoxError> for HeraldError {
    fn from(err: BoxError) -> Self {
        HeraldError::Custom(err)
    }
}

impl From<BoxError> for DispatchError {
    fn from(err: BoxError) -> Self {
        DispatchError::Listener(err)
    }
}
