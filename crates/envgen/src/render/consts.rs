//! Environment key constants.

use proc_macro2::TokenStream as QuoteStream;
use quote::quote;

use super::RenderContext;

/// `pub const <KEY>_ENV: &str = "<KEY>";` for every leaf, in leaf order.
pub fn generate_consts(ctx: &RenderContext<'_>) -> QuoteStream {
    let cfg = &ctx.cfg;

    let items = ctx.leaves.iter().zip(&ctx.consts).map(|(leaf, name)| {
        let key = &leaf.env_key;
        let doc = format!(" Variable read for `{}` (`{}`).", leaf.name(), leaf.primitive.name());

        quote! {
            #cfg
            #[doc = #doc]
            pub const #name: &str = #key;
        }
    });

    quote! { #(#items)* }
}
