//! Attribute macros for Herald.
//!
//! Re-exported by the `herald` crate behind the `macros` feature; the
//! generated code refers to items through `::herald`.

use proc_macro::TokenStream;

mod listeners;

/// Turn an impl block into a `ListenerAggregate`.
///
/// Every method annotated with `#[listen(event = "...")]` becomes a listener
/// for that event. Optional arguments:
///
/// - `priority = <expr>`: listener priority (higher runs first)
/// - `condition = <expr>`: a `Fn(&Event) -> bool` guard
///
/// The type must be `Clone + Send + Sync + 'static`; each listener owns a
/// clone of it. Pass `response = Type` to `#[listeners]` when listeners
/// respond with something other than `()`.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone)]
/// struct Router;
///
/// #[herald::listeners(response = String)]
/// impl Router {
///     #[listen(event = "request", priority = 10)]
///     fn route(&self, event: &mut Event, _: &EventDispatcher<String>)
///         -> Result<Option<String>, BoxError>
///     {
///         Ok(Some(format!("routed {}", event.name())))
///     }
/// }
///
/// dispatcher.attach_aggregate(&Router)?;
/// ```
#[proc_macro_attribute]
pub fn listeners(attr: TokenStream, item: TokenStream) -> TokenStream {
    listeners::listeners_impl(attr, item)
}

/// Marks a method as a listener inside a `#[listeners]` impl block.
///
/// Using it anywhere else is a compile error.
#[proc_macro_attribute]
pub fn listen(attr: TokenStream, item: TokenStream) -> TokenStream {
    listeners::listen_impl(attr, item)
}
