//! `#[listeners]` / `#[listen]` expansion.
//!
//! `#[listeners]` goes on an inherent impl block. Every method in it tagged
//! with `#[listen(...)]` is turned into a `herald::Listener` and the block
//! gains a `herald::ListenerAggregate` impl that attaches them all.

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{
    Expr, Ident, ImplItem, ImplItemFn, ItemImpl, LitStr, Token, Type,
    parse::{Parse, ParseStream},
    parse_macro_input,
};

/// Arguments of `#[listeners(...)]`.
pub(crate) struct ListenersArgs {
    /// Response type of the generated aggregate, `()` when omitted.
    pub response: Option<Type>,
}

impl Parse for ListenersArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut response = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "response" => {
                    response = Some(input.parse()?);
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(ListenersArgs { response })
    }
}

/// Arguments of `#[listen(...)]` on a method.
pub(crate) struct ListenArgs {
    pub event: LitStr,
    pub priority: Option<Expr>,
    pub condition: Option<Expr>,
}

impl Parse for ListenArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut event = None;
        let mut priority = None;
        let mut condition = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "event" => {
                    let lit: LitStr = input.parse()?;
                    if lit.value().is_empty() {
                        return Err(syn::Error::new(lit.span(), "event name must not be empty"));
                    }
                    event = Some(lit);
                }
                "priority" => {
                    priority = Some(input.parse()?);
                }
                "condition" => {
                    condition = Some(input.parse()?);
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        let event = event.ok_or_else(|| {
            syn::Error::new(input.span(), "missing `event = \"...\"` in #[listen]")
        })?;

        Ok(ListenArgs {
            event,
            priority,
            condition,
        })
    }
}

/// Remove the `#[listen]` attribute from `method`, returning its arguments.
fn take_listen_attr(method: &mut ImplItemFn) -> syn::Result<Option<ListenArgs>> {
    let Some(index) = method
        .attrs
        .iter()
        .position(|attr| attr.path().is_ident("listen"))
    else {
        return Ok(None);
    };

    let attr = method.attrs.remove(index);
    if method.attrs.iter().any(|attr| attr.path().is_ident("listen")) {
        return Err(syn::Error::new_spanned(
            &method.sig.ident,
            "a method can carry only one #[listen] attribute",
        ));
    }
    if method.sig.receiver().is_none() {
        return Err(syn::Error::new_spanned(
            &method.sig.ident,
            "#[listen] methods must take `&self`",
        ));
    }
    if method.sig.inputs.len() != 3 {
        return Err(syn::Error::new_spanned(
            &method.sig.inputs,
            "#[listen] methods must have the signature \
             fn(&self, &mut Event, &EventDispatcher<R>) -> Result<Option<R>, BoxError>",
        ));
    }
    attr.parse_args::<ListenArgs>().map(Some)
}

fn expand(args: ListenersArgs, mut item: ItemImpl) -> syn::Result<proc_macro2::TokenStream> {
    if let Some((_, path, _)) = &item.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[listeners] must be placed on an inherent impl block",
        ));
    }

    let response = args.response.unwrap_or_else(|| syn::parse_quote!(()));
    let mut registrations = Vec::new();

    for impl_item in &mut item.items {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };
        let Some(listen) = take_listen_attr(method)? else {
            continue;
        };

        let method_name = &method.sig.ident;
        let this = format_ident!("__this_{}", method_name);
        let event = &listen.event;
        let priority = listen
            .priority
            .map(|p| quote! { .with_priority(#p) });
        let condition = listen
            .condition
            .map(|c| quote! { .with_condition(#c) });

        registrations.push(quote! {
            {
                let #this = ::core::clone::Clone::clone(self);
                __dispatcher.attach(
                    ::herald::Listener::new(#event, move |__event, __inner| {
                        #this.#method_name(__event, __inner)
                    })
                    #priority
                    #condition
                )?;
            }
        });
    }

    if registrations.is_empty() {
        return Err(syn::Error::new_spanned(
            &item.self_ty,
            "#[listeners] found no #[listen] methods",
        ));
    }

    let self_ty = &item.self_ty;
    let (impl_generics, _, where_clause) = item.generics.split_for_impl();

    Ok(quote! {
        #item

        impl #impl_generics ::herald::ListenerAggregate<#response> for #self_ty #where_clause {
            fn attach_listeners(
                &self,
                __dispatcher: &::herald::EventDispatcher<#response>,
            ) -> ::core::result::Result<(), ::herald::HeraldError> {
                #(#registrations)*
                ::core::result::Result::Ok(())
            }
        }
    })
}

/// Entry point for `#[listeners]`.
pub fn listeners_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as ListenersArgs);
    let item = parse_macro_input!(item as ItemImpl);

    match expand(args, item) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Entry point for a `#[listen]` that was not consumed by `#[listeners]`.
pub fn listen_impl(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let item = proc_macro2::TokenStream::from(item);
    let err = syn::Error::new_spanned(
        &item,
        "#[listen] is only valid on methods inside a #[listeners] impl block",
    )
    .to_compile_error();

    quote! { #err #item }.into()
}
