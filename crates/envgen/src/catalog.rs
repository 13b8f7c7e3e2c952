//! Type catalog: every top-level record declared in the input file.
//!
//! The catalog is the generator's view of the source file. It maps each
//! struct name to its ordered field declarations and is consulted by the
//! flattener to decide whether a field is a nested record or a leaf.
//!
//! Only structs with named fields are records. Unit structs are kept as
//! records without fields; tuple structs, enums, unions, type aliases and
//! everything else are ignored.
//!
//! ```rust,ignore
//! let catalog = RecordCatalog::parse("config.rs", source)?;
//! let config = catalog.get("Config").expect("declared above");
//! ```

use std::collections::BTreeMap;

use quote::ToTokens;
use syn::{Fields, File, Ident, Item, ItemStruct, Type};

use crate::error::{Error, Result};

/// One field declaration inside a record.
///
/// Rust declares one name per field, but the catalog keeps the more general
/// "one type, many names" form so that catalogs assembled by hand can use
/// it too. A declaration with no names is skipped by the flattener.
#[derive(Clone, Debug)]
pub struct FieldDecl {
    /// Field names sharing this declaration, in declaration order.
    pub names: Vec<Ident>,

    /// The declared field type.
    pub ty: Type,
}

impl FieldDecl {
    /// Creates a declaration with a single name.
    pub fn new(name: Ident, ty: Type) -> Self {
        Self {
            names: vec![name],
            ty,
        }
    }
}

/// A record (struct) declaration.
#[derive(Clone, Debug)]
pub struct RecordDecl {
    /// The struct's name.
    pub ident: Ident,

    /// Field declarations in source order.
    pub fields: Vec<FieldDecl>,
}

impl RecordDecl {
    /// Converts a struct item, returning `None` for tuple structs.
    pub fn from_item(item: &ItemStruct) -> Option<Self> {
        let fields = match &item.fields {
            Fields::Named(named) => named
                .named
                .iter()
                .map(|field| FieldDecl {
                    names: field.ident.iter().cloned().collect(),
                    ty: field.ty.clone(),
                })
                .collect(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => return None,
        };

        Some(Self {
            ident: item.ident.clone(),
            fields,
        })
    }
}

/// Name-indexed map of every record declared at the top level of a file.
///
/// Built once per generation run and read-only afterwards. Iteration is in
/// name order, which keeps diagnostics deterministic.
#[derive(Clone, Debug, Default)]
pub struct RecordCatalog {
    records: BTreeMap<String, RecordDecl>,
}

impl RecordCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `source` and collects its records.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if `source` is not valid Rust. There is no
    /// partial result.
    pub fn parse(name: &str, source: &str) -> Result<Self> {
        let file = syn::parse_file(source).map_err(|err| Error::parse(name, source, &err))?;
        Ok(Self::from_file(&file))
    }

    /// Collects the records declared at the top level of `file`.
    #[must_use]
    pub fn from_file(file: &File) -> Self {
        let mut catalog = Self::new();

        for item in &file.items {
            // Functions, impls, aliases, modules and the like carry no fields
            let Item::Struct(item) = item else {
                continue;
            };

            if let Some(record) = RecordDecl::from_item(item) {
                catalog.insert(record);
            }
        }

        tracing::debug!(records = catalog.len(), "built record catalog");
        catalog
    }

    /// Adds a record, replacing any previous record with the same name.
    pub fn insert(&mut self, record: RecordDecl) -> Option<RecordDecl> {
        self.records.insert(unraw(&record.ident), record)
    }

    /// Looks up a record by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RecordDecl> {
        self.records.get(name)
    }

    /// Whether `name` is a record in this catalog.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Record names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The `::`-joined name of a plain path type, such as `std::time::Duration`.
///
/// Returns `None` for anything that is not a bare path: references, arrays,
/// tuples, qualified paths and paths carrying generic arguments.
pub(crate) fn type_path_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Group(group) => type_path_name(&group.elem),
        Type::Paren(paren) => type_path_name(&paren.elem),
        Type::Path(path) if path.qself.is_none() => {
            let mut name = String::new();

            for segment in &path.path.segments {
                if !segment.arguments.is_none() {
                    return None;
                }
                if !name.is_empty() {
                    name.push_str("::");
                }
                name.push_str(&unraw(&segment.ident));
            }

            Some(name)
        }
        _ => None,
    }
}

/// Renders a type compactly for error messages (`Vec<u8>`, not `Vec < u8 >`).
pub(crate) fn display_type(ty: &Type) -> String {
    ty.to_token_stream().to_string().replace(' ', "")
}

/// The identifier without any `r#` prefix.
pub(crate) fn unraw(ident: &Ident) -> String {
    use syn::ext::IdentExt;

    ident.unraw().to_string()
}
