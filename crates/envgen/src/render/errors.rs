//! Sentinel enum and the aggregated load error.
//!
//! Every leaf gets a "not set" variant, and leaves whose parser can fail also
//! get a "malformed" variant. Variants are declared in leaf order with the
//! missing one first, so callers can match on individual failures:
//!
//! ```text
//! pub enum ConfigEnvError {
//!     ErrAppApikeyEnvMissing,
//!     ErrAppServerPortEnvMissing,
//!     ErrAppServerPortEnvInvalid,
//! }
//! ```

use proc_macro2::TokenStream as QuoteStream;
use quote::quote;
use syn::Ident;

use super::RenderContext;

struct Variant<'a> {
    ident: &'a Ident,
    key_const: &'a Ident,
    missing: bool,
    doc: String,
}

fn variants<'a>(ctx: &'a RenderContext<'_>) -> Vec<Variant<'a>> {
    let mut variants = Vec::new();

    for (i, leaf) in ctx.leaves.iter().enumerate() {
        variants.push(Variant {
            ident: &ctx.missing[i],
            key_const: &ctx.consts[i],
            missing: true,
            doc: format!(" `{}` is not set.", leaf.env_key),
        });

        if let Some(invalid) = &ctx.invalid[i] {
            variants.push(Variant {
                ident: invalid,
                key_const: &ctx.consts[i],
                missing: false,
                doc: format!(
                    " `{}` is set but is not a valid `{}`.",
                    leaf.env_key,
                    leaf.primitive.name()
                ),
            });
        }
    }

    variants
}

/// The sentinel enum with `var`, `is_missing`, `Display` and `Error`.
pub fn generate_sentinels(ctx: &RenderContext<'_>) -> QuoteStream {
    let cfg = &ctx.cfg;
    let sentinel = &ctx.sentinel;
    let loader = &ctx.loader;

    let variants = variants(ctx);
    let idents: Vec<&Ident> = variants.iter().map(|v| v.ident).collect();
    let docs = variants.iter().map(|v| &v.doc);
    let key_consts = variants.iter().map(|v| v.key_const);
    let flags = variants.iter().map(|v| v.missing);

    let enum_doc = format!(" A single variable problem reported by [`{loader}`].");

    // An uninhabited enum still needs its methods, with empty matches
    let (var_body, missing_body) = if idents.is_empty() {
        (quote!(match self {}), quote!(match self {}))
    } else {
        (
            quote! { match self { #( Self::#idents => #key_consts, )* } },
            quote! { match self { #( Self::#idents => #flags, )* } },
        )
    };

    quote! {
        #cfg
        #[doc = #enum_doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[allow(clippy::enum_variant_names)]
        pub enum #sentinel {
            #(
                #[doc = #docs]
                #idents,
            )*
        }

        #cfg
        impl #sentinel {
            /// Name of the environment variable this error is about.
            #[must_use]
            pub const fn var(self) -> &'static str {
                #var_body
            }

            /// Whether the variable was not set, as opposed to malformed.
            #[must_use]
            pub const fn is_missing(self) -> bool {
                #missing_body
            }
        }

        #cfg
        impl ::std::fmt::Display for #sentinel {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.var())
            }
        }

        #cfg
        impl ::std::error::Error for #sentinel {}
    }
}

/// The struct returned by the loader when any variable is missing or invalid.
pub fn generate_load_error(ctx: &RenderContext<'_>) -> QuoteStream {
    let cfg = &ctx.cfg;
    let sentinel = &ctx.sentinel;
    let load_error = &ctx.load_error;
    let loader = &ctx.loader;

    let doc = format!(" Every variable problem found by one call to [`{loader}`].");

    quote! {
        #cfg
        #[doc = #doc]
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct #load_error {
            /// Variables that are not set, in field order.
            pub missing: ::std::vec::Vec<#sentinel>,
            /// Variables that are set but malformed, in field order.
            pub invalid: ::std::vec::Vec<#sentinel>,
        }

        #cfg
        impl #load_error {
            /// Every reported problem, missing variables first.
            pub fn errors(&self) -> impl ::std::iter::Iterator<Item = #sentinel> + '_ {
                self.missing.iter().chain(self.invalid.iter()).copied()
            }

            fn write_vars(
                f: &mut ::std::fmt::Formatter<'_>,
                errors: &[#sentinel],
            ) -> ::std::fmt::Result {
                for (i, error) in errors.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    f.write_str(error.var())?;
                }
                Ok(())
            }
        }

        #cfg
        impl ::std::fmt::Display for #load_error {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                if !self.missing.is_empty() {
                    f.write_str("envs ")?;
                    Self::write_vars(f, &self.missing)?;
                    f.write_str(" are not set")?;
                }
                if !self.invalid.is_empty() {
                    if !self.missing.is_empty() {
                        f.write_str("; ")?;
                    }
                    f.write_str("envs ")?;
                    Self::write_vars(f, &self.invalid)?;
                    f.write_str(" have an invalid value")?;
                }
                Ok(())
            }
        }

        #cfg
        impl ::std::error::Error for #load_error {}
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::RecordCatalog;
    use crate::flatten::flatten;
    use crate::render::{RenderOptions, render};

    fn module(source: &str) -> String {
        let catalog = RecordCatalog::parse("config.rs", source).unwrap();
        let flattened = flatten(&catalog, "Config", "APP").unwrap();
        render("APP", &flattened, &RenderOptions::default()).unwrap()
    }

    fn variant_names(module: &str) -> Vec<String> {
        let file = syn::parse_file(module).unwrap();
        file.items
            .iter()
            .find_map(|item| match item {
                syn::Item::Enum(e) if e.ident == "ConfigEnvError" => Some(e),
                _ => None,
            })
            .unwrap()
            .variants
            .iter()
            .map(|v| v.ident.to_string())
            .collect()
    }

    #[test]
    fn test_variants_follow_leaf_order() {
        let module = module(
            "struct Config { apikey: String, server: Server, debug: bool }
             struct Server { port: u16 }",
        );

        assert_eq!(
            variant_names(&module),
            [
                "ErrAppApikeyEnvMissing",
                "ErrAppServerPortEnvMissing",
                "ErrAppServerPortEnvInvalid",
                "ErrAppDebugEnvMissing",
                "ErrAppDebugEnvInvalid",
            ]
        );
    }

    #[test]
    fn test_sentinels_map_to_key_constants() {
        let module = module("struct Config { port: u16 }");

        assert!(module.contains("Self::ErrAppPortEnvMissing => APP_PORT_ENV"), "{module}");
        assert!(module.contains("Self::ErrAppPortEnvInvalid => APP_PORT_ENV"));
        assert!(module.contains("Self::ErrAppPortEnvMissing => true"));
        assert!(module.contains("Self::ErrAppPortEnvInvalid => false"));
    }

    #[test]
    fn test_empty_record_has_uninhabited_sentinel() {
        let module = module("struct Config {}");

        assert!(variant_names(&module).is_empty());
        let compact: String = module.chars().filter(|c| !c.is_whitespace()).collect();
        assert!(compact.contains("matchself{}"), "{module}");
        assert!(module.contains("pub struct ConfigLoadError"));
    }
}
