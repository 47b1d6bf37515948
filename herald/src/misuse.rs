//! Macro inputs that must be rejected at compile time.
//!
//! Only compiled while collecting doctests with the `macros` feature on.

/// `#[listen]` outside a `#[listeners]` block:
///
/// ```compile_fail
/// use herald::{BoxError, Event, EventDispatcher, listen};
///
/// #[derive(Clone)]
/// struct Loose;
///
/// impl Loose {
///     #[listen(event = "tick")]
///     fn on_tick(&self, _: &mut Event, _: &EventDispatcher) -> Result<Option<()>, BoxError> {
///         Ok(None)
///     }
/// }
/// ```
pub struct ListenOutsideListeners;

/// `#[listeners]` on a trait impl:
///
/// ```compile_fail
/// use herald::{BoxError, Event, EventDispatcher, listeners};
///
/// trait Tick {
///     fn on_tick(&self, event: &mut Event, dispatcher: &EventDispatcher)
///         -> Result<Option<()>, BoxError>;
/// }
///
/// #[derive(Clone)]
/// struct Clock;
///
/// #[listeners]
/// impl Tick for Clock {
///     #[listen(event = "tick")]
///     fn on_tick(&self, _: &mut Event, _: &EventDispatcher) -> Result<Option<()>, BoxError> {
///         Ok(None)
///     }
/// }
/// ```
pub struct ListenersOnTraitImpl;

/// An empty event name:
///
/// ```compile_fail
/// use herald::{BoxError, Event, EventDispatcher, listeners};
///
/// #[derive(Clone)]
/// struct Clock;
///
/// #[listeners]
/// impl Clock {
///     #[listen(event = "")]
///     fn on_tick(&self, _: &mut Event, _: &EventDispatcher) -> Result<Option<()>, BoxError> {
///         Ok(None)
///     }
/// }
/// ```
pub struct EmptyEventName;

/// No event name at all:
///
/// ```compile_fail
/// use herald::{BoxError, Event, EventDispatcher, listeners};
///
/// #[derive(Clone)]
/// struct Clock;
///
/// #[listeners]
/// impl Clock {
///     #[listen(priority = 5)]
///     fn on_tick(&self, _: &mut Event, _: &EventDispatcher) -> Result<Option<()>, BoxError> {
///         Ok(None)
///     }
/// }
/// ```
pub struct MissingEventName;

/// A `#[listeners]` block without any `#[listen]` method:
///
/// ```compile_fail
/// use herald::listeners;
///
/// #[derive(Clone)]
/// struct Clock;
///
/// #[listeners]
/// impl Clock {
///     fn now(&self) -> u64 {
///         0
///     }
/// }
/// ```
pub struct NoListenMethods;

/// A listener method without `&self`:
///
/// ```compile_fail
/// use herald::{BoxError, Event, EventDispatcher, listeners};
///
/// #[derive(Clone)]
/// struct Clock;
///
/// #[listeners]
/// impl Clock {
///     #[listen(event = "tick")]
///     fn on_tick(_: &mut Event, _: &EventDispatcher) -> Result<Option<()>, BoxError> {
///         Ok(None)
///     }
/// }
/// ```
pub struct MissingReceiver;

/// The same method registered without the mistakes above compiles:
///
/// ```
/// use herald::{BoxError, Event, EventDispatcher, listeners};
///
/// #[derive(Clone)]
/// struct Clock;
///
/// #[listeners]
/// impl Clock {
///     #[listen(event = "tick", priority = 5)]
///     fn on_tick(&self, _: &mut Event, _: &EventDispatcher) -> Result<Option<()>, BoxError> {
///         Ok(None)
///     }
/// }
///
/// let dispatcher: EventDispatcher = EventDispatcher::new();
/// dispatcher.attach_aggregate(&Clock).unwrap();
/// assert!(dispatcher.has_listeners("tick"));
/// ```
pub struct WellFormed;
