//! Bound for values a listener can answer with.

use std::{borrow::Cow, sync::Arc};

/// A value a listener may return from its callback.
///
/// `ask` hands the first such value back to the caller and `collect` gathers
/// all of them into [`Responses`](crate::Responses). The dispatcher itself is
/// shared between threads, so every response type has to be
/// `Send + Sync + 'static`.
///
/// Use `()` when listeners only react to events and never answer.
///
/// ```rust,ignore
/// #[derive(Debug)]
/// struct Quote { cents: u64 }
///
/// impl Message for Quote {}
///
/// let pricing = EventDispatcher::<Quote>::new();
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be returned by a herald listener",
    label = "not a listener response",
    note = "implement `herald::Message` for `{Self}`; it must be `Send + Sync + 'static`"
)]
pub trait Message: Send + Sync + 'static {}

macro_rules! responses {
    ($($ty:ty),* $(,)?) => {
        $(impl Message for $ty {})*
    };
}

responses!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    String,
    &'static str,
    Cow<'static, str>,
);

impl<T: Message> Message for Option<T> {}
impl<T: Message> Message for Vec<T> {}
impl<T: Message + ?Sized> Message for Box<T> {}
impl<T: Message + ?Sized> Message for Arc<T> {}
impl<T: Message, E: Message> Message for Result<T, E> {}
impl<A: Message, B: Message> Message for (A, B) {}
