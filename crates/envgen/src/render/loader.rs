//! The load function.
//!
//! For each leaf the loader reads the variable once, records a sentinel when
//! it is missing or malformed, and keeps going. Only after every leaf has
//! been visited does it decide between the constructed record and the
//! aggregated error:
//!
//! ```text
//! let val_port: Option<u16> = match var_os(APP_PORT_ENV) {
//!     Some(raw) => { parse, push Invalid on failure }
//!     None => { push Missing; None }
//! };
//! ...
//! if let (Some(val_a), Some(val_port),) = (val_a, val_port,) {
//!     return Ok(Config { a: val_a, server: ServerConfig { port: val_port } });
//! }
//! Err(ConfigLoadError { missing, invalid })
//! ```

use proc_macro2::TokenStream as QuoteStream;
use quote::quote;

use super::RenderContext;
use crate::flatten::{LayoutField, RecordLayout};
use crate::resolve::{ParseOp, ParserMetadata};

/// `pub fn load_<root>() -> Result<Root, RootLoadError>`.
pub fn generate_loader(ctx: &RenderContext<'_>) -> QuoteStream {
    let cfg = &ctx.cfg;
    let loader = &ctx.loader;
    let root = &ctx.root.ident;
    let load_error = &ctx.load_error;

    let summary = format!(" Loads [`{root}`] from the process environment.");
    let prefix = format!(" Every variable starts with `{}_`.", ctx.prefix);
    let errors = format!(" Returns [`{load_error}`] listing every missing and every malformed variable.");
    let lossy = ctx
        .leaves
        .iter()
        .any(|leaf| leaf.parser.op == ParseOp::Raw)
        .then(|| {
            quote! {
                #[doc = ""]
                #[doc = " `String` fields are read with [`OsStr::to_string_lossy`](std::ffi::OsStr::to_string_lossy),"]
                #[doc = " so bytes that are not valid UTF-8 become `U+FFFD`."]
            }
        });
    let literal = record_literal(ctx.root, ctx);
    let body = if ctx.leaves.is_empty() {
        quote!(Ok(#literal))
    } else {
        collecting_body(ctx, &literal)
    };

    quote! {
        #cfg
        #[doc = #summary]
        #[doc = ""]
        #[doc = " Variables are read on every call and all of them are checked before"]
        #[doc = " returning, so a single error reports every problem at once."]
        #[doc = #prefix]
        #lossy
        #[doc = ""]
        #[doc = " # Errors"]
        #[doc = ""]
        #[doc = #errors]
        pub fn #loader() -> ::std::result::Result<#root, #load_error> {
            #body
        }
    }
}

fn collecting_body(ctx: &RenderContext<'_>, literal: &QuoteStream) -> QuoteStream {
    let sentinel = &ctx.sentinel;
    let load_error = &ctx.load_error;
    let bindings = &ctx.bindings;

    // String-only records never push an invalid sentinel
    let invalid_mut = ctx.any_can_fail().then(|| quote!(mut));
    let reads = (0..ctx.leaves.len()).map(|i| read_leaf(ctx, i));

    quote! {
        let mut missing: ::std::vec::Vec<#sentinel> = ::std::vec::Vec::new();
        let #invalid_mut invalid: ::std::vec::Vec<#sentinel> = ::std::vec::Vec::new();

        #(#reads)*

        if let ( #( Some(#bindings), )* ) = ( #( #bindings, )* ) {
            return Ok(#literal);
        }

        Err(#load_error { missing, invalid })
    }
}

/// The `let val_x: Option<T> = match ... ;` statement for leaf `i`.
fn read_leaf(ctx: &RenderContext<'_>, i: usize) -> QuoteStream {
    let leaf = &ctx.leaves[i];
    let sentinel = &ctx.sentinel;
    let binding = &ctx.bindings[i];
    let key_const = &ctx.consts[i];
    let missing = &ctx.missing[i];
    let ty = leaf.primitive.rust_type();

    let present = match &ctx.invalid[i] {
        None => quote!(Some(raw.to_string_lossy().into_owned())),
        Some(invalid) => {
            let parsed = parse_expr(leaf.parser);
            quote! {{
                let raw = raw.to_string_lossy();
                let parsed: ::std::option::Option<#ty> = #parsed;
                if parsed.is_none() {
                    invalid.push(#sentinel::#invalid);
                }
                parsed
            }}
        }
    };

    quote! {
        let #binding: ::std::option::Option<#ty> = match ::std::env::var_os(#key_const) {
            Some(raw) => #present,
            None => {
                missing.push(#sentinel::#missing);
                None
            }
        };
    }
}

/// Expression of type `Option<T>` parsing the `raw` string for `parser`.
pub fn parse_expr(parser: ParserMetadata) -> QuoteStream {
    let wide = parser.op.parsed().rust_type();

    let parsed = match parser.op {
        ParseOp::Raw => return quote!(Some(raw.into_owned())),
        ParseOp::Bool => return quote!(parse_bool(&raw)),
        ParseOp::Duration => return quote!(parse_duration(&raw)),
        // `u64::from_str` takes a leading `+`, unsigned variables must not
        ParseOp::Unsigned => quote!(raw.parse::<#wide>().ok().filter(|_| !raw.starts_with('+'))),
        ParseOp::Word | ParseOp::Signed | ParseOp::Float => quote!(raw.parse::<#wide>().ok()),
    };

    match (parser.op, parser.cast) {
        (ParseOp::Float, cast) => {
            let narrowed = match cast {
                Some(narrow) => {
                    let narrow = narrow.rust_type();
                    quote!(#parsed.map(|v| v as #narrow))
                }
                None => parsed,
            };
            // Out-of-range literals overflow to infinity, only an explicit
            // `inf`/`infinity` may produce one.
            quote! {
                #narrowed.filter(|v| {
                    let spelled = raw.trim_start_matches(['+', '-']);
                    !v.is_infinite()
                        || spelled.eq_ignore_ascii_case("inf")
                        || spelled.eq_ignore_ascii_case("infinity")
                })
            }
        }
        (_, None) => parsed,
        (_, Some(narrow)) => {
            let narrow = narrow.rust_type();
            quote!(#parsed.and_then(|v| <#narrow as ::std::convert::TryFrom<#wide>>::try_from(v).ok()))
        }
    }
}

/// Struct literal rebuilding `layout` from the leaf bindings.
fn record_literal(layout: &RecordLayout, ctx: &RenderContext<'_>) -> QuoteStream {
    let ident = &layout.ident;

    let fields = layout.fields.iter().map(|(name, slot)| match slot {
        LayoutField::Leaf(i) => {
            let binding = &ctx.bindings[*i];
            quote!(#name: #binding)
        }
        LayoutField::Record(nested) => {
            let nested = record_literal(nested, ctx);
            quote!(#name: #nested)
        }
    });

    quote!(#ident { #(#fields),* })
}
