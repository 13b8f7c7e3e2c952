//! Loader module rendering.
//!
//! The renderer never concatenates source text. Every part of the module is
//! built as tokens with [`quote`], the whole module is parsed back into a
//! [`syn::File`], and [`prettyplease`] prints it. A module that fails to
//! parse is reported as [`Error::Render`] instead of being written out.
//!
//! # Generated Module
//!
//! | Item | Generator |
//! |------|-----------|
//! | `use super::{Config, ...};` | [`render`] |
//! | `pub const APP_PORT_ENV: &str` | [`consts::generate_consts`] |
//! | `pub enum ConfigEnvError` | [`errors::generate_sentinels`] |
//! | `pub struct ConfigLoadError` | [`errors::generate_load_error`] |
//! | `pub fn load_config()` | [`loader::generate_loader`] |
//! | `fn parse_bool` / `fn parse_duration` | [`helpers::generate_helpers`] |
//!
//! Items appear in that order, and within each item in leaf order, so the
//! output depends only on the input declaration and the options.

use proc_macro2::TokenStream as QuoteStream;
use quote::quote;
use syn::{Ident, Meta, Path};

use crate::catalog::unraw;
use crate::error::{Error, Result};
use crate::flatten::{Flattened, LeafFieldDescriptor, RecordLayout};
use crate::naming::{const_name, load_error_name, loader_fn_name, sentinel_enum_name};

pub mod consts;
pub mod errors;
pub mod helpers;
pub mod loader;

/// First line of every generated module.
pub const HEADER_MARKER: &str = "// Code generated by envgen";

/// Options controlling how the module refers to its surroundings.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Module path the config structs are imported from. `None` renders no
    /// import, for loaders included into the module that declares the structs.
    pub types_path: Option<Path>,

    /// Predicate placed in a `#[cfg(...)]` on every generated item.
    pub cfg: Option<Meta>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            types_path: Some(syn::parse_quote!(super)),
            cfg: None,
        }
    }
}

/// Identifiers shared by the item generators, validated once up front.
pub struct RenderContext<'a> {
    /// Normalized project prefix.
    pub prefix: &'a str,

    /// Layout of the root record.
    pub root: &'a RecordLayout,

    /// Leaves in flattening order.
    pub leaves: &'a [LeafFieldDescriptor],

    /// `#[cfg(...)]` attribute, or nothing.
    pub cfg: QuoteStream,

    /// Name of the sentinel enum.
    pub sentinel: Ident,

    /// Name of the combined error struct.
    pub load_error: Ident,

    /// Name of the load function.
    pub loader: Ident,

    /// Per leaf: the key constant.
    pub consts: Vec<Ident>,

    /// Per leaf: the local binding.
    pub bindings: Vec<Ident>,

    /// Per leaf: the "not set" variant.
    pub missing: Vec<Ident>,

    /// Per leaf: the "malformed" variant, if the parser can fail.
    pub invalid: Vec<Option<Ident>>,
}

impl<'a> RenderContext<'a> {
    /// Derives and validates every identifier the module will declare.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] if a derived name is not a valid
    /// Rust identifier, e.g. because the prefix starts with a digit.
    pub fn new(prefix: &'a str, flattened: &'a Flattened, options: &RenderOptions) -> Result<Self> {
        let root_name = unraw(&flattened.root.ident);

        let mut consts = Vec::with_capacity(flattened.leaves.len());
        let mut bindings = Vec::with_capacity(flattened.leaves.len());
        let mut missing = Vec::with_capacity(flattened.leaves.len());
        let mut invalid = Vec::with_capacity(flattened.leaves.len());

        for leaf in &flattened.leaves {
            let field = leaf.name();

            consts.push(ident(&const_name(&leaf.env_key), &field)?);
            bindings.push(ident(&leaf.binding(), &field)?);
            missing.push(ident(&leaf.missing_error, &field)?);
            invalid.push(
                leaf.invalid_error
                    .as_deref()
                    .map(|id| ident(id, &field))
                    .transpose()?,
            );
        }

        let cfg = options
            .cfg
            .as_ref()
            .map(|predicate| quote!(#[cfg(#predicate)]))
            .unwrap_or_default();

        Ok(Self {
            prefix,
            root: &flattened.root,
            leaves: &flattened.leaves,
            cfg,
            sentinel: ident(&sentinel_enum_name(&root_name), &root_name)?,
            load_error: ident(&load_error_name(&root_name), &root_name)?,
            loader: ident(&loader_fn_name(&root_name), &root_name)?,
            consts,
            bindings,
            missing,
            invalid,
        })
    }

    /// Whether any leaf can produce an invalid-value error.
    #[must_use]
    pub fn any_can_fail(&self) -> bool {
        self.invalid.iter().any(Option::is_some)
    }
}

/// Renders the complete loader module for a flattened root record.
///
/// # Errors
///
/// - [`Error::InvalidIdentifier`] if a derived name is unusable
/// - [`Error::Render`] if the assembled tokens do not form a valid file
pub fn render(prefix: &str, flattened: &Flattened, options: &RenderOptions) -> Result<String> {
    let ctx = RenderContext::new(prefix, flattened, options)?;
    let root_name = unraw(&flattened.root.ident);

    let imports = generate_imports(&ctx, options)?;
    let consts = consts::generate_consts(&ctx);
    let sentinels = errors::generate_sentinels(&ctx);
    let load_error = errors::generate_load_error(&ctx);
    let loader = loader::generate_loader(&ctx);
    let helpers = helpers::generate_helpers(&ctx);

    let tokens = quote! {
        #imports
        #consts
        #sentinels
        #load_error
        #loader
        #helpers
    };

    let file: syn::File = syn::parse2(tokens).map_err(|source| Error::Render {
        root: root_name.clone(),
        source,
    })?;

    tracing::debug!(root = %root_name, items = file.items.len(), "rendered loader module");

    Ok(format!(
        "{HEADER_MARKER} from `{root_name}`; DO NOT EDIT.\n\n{}",
        prettyplease::unparse(&file)
    ))
}

/// `use <types_path>::{...};` for every record the loader constructs.
fn generate_imports(ctx: &RenderContext<'_>, options: &RenderOptions) -> Result<QuoteStream> {
    let Some(types_path) = &options.types_path else {
        return Ok(QuoteStream::new());
    };

    let records = ctx
        .root
        .record_names()
        .iter()
        .map(|name| ident(name, name))
        .collect::<Result<Vec<_>>>()?;
    let cfg = &ctx.cfg;

    Ok(quote! {
        #cfg
        use #types_path::{#(#records),*};
    })
}

/// Parses `name` as an identifier, rejecting keywords and malformed names.
fn ident(name: &str, field: &str) -> Result<Ident> {
    syn::parse_str::<Ident>(name).map_err(|_| Error::InvalidIdentifier {
        name: name.to_string(),
        field: field.to_string(),
    })
}
