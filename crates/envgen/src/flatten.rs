//! Flattening of nested records into leaf fields.
//!
//! The flattener walks the root record depth-first in declaration order.
//! A field whose type is another record in the catalog is expanded in place;
//! every other field is a leaf and becomes a [`LeafFieldDescriptor`].
//!
//! ```text
//! struct Config {              leaves (pre-order):
//!     apikey: String,            apikey          APP_APIKEY
//!     server: ServerConfig,  ->  server.host     APP_SERVER_HOST
//!     debug: bool,               server.port     APP_SERVER_PORT
//! }                              debug           APP_DEBUG
//! struct ServerConfig { host: String, port: u16 }
//! ```
//!
//! Alongside the flat list, the walk records a [`RecordLayout`] tree so the
//! renderer can rebuild the nested value with struct literals.

use std::collections::BTreeSet;

use syn::{Ident, Type};

use crate::catalog::{RecordCatalog, RecordDecl, display_type, type_path_name, unraw};
use crate::error::{Error, Result};
use crate::naming::{env_key, error_ids};
use crate::path::FieldPath;
use crate::resolve::{ParserMetadata, Primitive};

/// Everything the renderer needs to know about one leaf field.
///
/// Created once when the walk reaches the leaf and never modified.
#[derive(Clone, Debug)]
pub struct LeafFieldDescriptor {
    /// Path from the root record to this field.
    pub path: FieldPath,

    /// The declared type as written in the source.
    pub ty: Type,

    /// The primitive the declared type resolved to.
    pub primitive: Primitive,

    /// Parser table row for [`primitive`](Self::primitive).
    pub parser: ParserMetadata,

    /// Environment variable read for this field.
    pub env_key: String,

    /// Identifier of the "not set" sentinel.
    pub missing_error: String,

    /// Identifier of the "malformed" sentinel, present only if parsing can fail.
    pub invalid_error: Option<String>,
}

impl LeafFieldDescriptor {
    /// The logical name, e.g. `server.port`.
    #[must_use]
    pub fn name(&self) -> String {
        self.path.dotted()
    }

    /// The local binding in the generated loader, e.g. `val_server_port`.
    #[must_use]
    pub fn binding(&self) -> String {
        self.path.binding()
    }
}

/// A field slot inside a [`RecordLayout`].
#[derive(Clone, Debug)]
pub enum LayoutField {
    /// Index into [`Flattened::leaves`].
    Leaf(usize),

    /// A nested record, expanded in place.
    Record(RecordLayout),
}

/// Shape of a record value: its type and its fields in declaration order.
#[derive(Clone, Debug)]
pub struct RecordLayout {
    /// The record's type name.
    pub ident: Ident,

    /// Field names paired with how each one is filled.
    pub fields: Vec<(Ident, LayoutField)>,
}

impl RecordLayout {
    /// Names of this record and every record nested inside it.
    #[must_use]
    pub fn record_names(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names(&self, names: &mut BTreeSet<String>) {
        names.insert(unraw(&self.ident));

        for (_, field) in &self.fields {
            if let LayoutField::Record(nested) = field {
                nested.collect_names(names);
            }
        }
    }
}

/// Result of flattening one root record.
#[derive(Clone, Debug)]
pub struct Flattened {
    /// Layout of the root record.
    pub root: RecordLayout,

    /// Leaf fields in pre-order, declaration order.
    pub leaves: Vec<LeafFieldDescriptor>,
}

/// Flattens `root` into its leaf fields.
///
/// `prefix` must already be normalized (see
/// [`normalize_prefix`](crate::naming::normalize_prefix)).
///
/// # Errors
///
/// - [`Error::RecordNotFound`] if `root` is not in the catalog
/// - [`Error::UnsupportedType`] for a leaf with no parser
/// - [`Error::RecursiveRecord`] if a record contains itself
pub fn flatten(catalog: &RecordCatalog, root: &str, prefix: &str) -> Result<Flattened> {
    let record = catalog
        .get(root)
        .ok_or_else(|| Error::record_not_found(root, catalog.names()))?;

    let mut flattener = Flattener {
        catalog,
        prefix,
        leaves: Vec::new(),
    };

    let layout = flattener.walk(record, &FieldPath::root(), &[root])?;

    tracing::debug!(root, leaves = flattener.leaves.len(), "flattened record");

    Ok(Flattened {
        root: layout,
        leaves: flattener.leaves,
    })
}

struct Flattener<'a> {
    catalog: &'a RecordCatalog,
    prefix: &'a str,
    leaves: Vec<LeafFieldDescriptor>,
}

impl<'a> Flattener<'a> {
    /// Walks one record. `visiting` lists the records currently being
    /// expanded, outermost first.
    fn walk(
        &mut self,
        record: &'a RecordDecl,
        path: &FieldPath,
        visiting: &[&str],
    ) -> Result<RecordLayout> {
        let mut fields = Vec::new();

        for decl in &record.fields {
            // A declaration may name several fields of the same type
            for name in &decl.names {
                let child = path.child(unraw(name));
                let slot = self.field(&decl.ty, child, visiting)?;
                fields.push((name.clone(), slot));
            }
        }

        Ok(RecordLayout {
            ident: record.ident.clone(),
            fields,
        })
    }

    fn field(&mut self, ty: &Type, path: FieldPath, visiting: &[&str]) -> Result<LayoutField> {
        let catalog = self.catalog;
        let type_name = type_path_name(ty);

        // Records declared in the same file take precedence over primitives
        if let Some(nested) = type_name.as_deref().and_then(|n| catalog.get(n)) {
            let nested_name = unraw(&nested.ident);

            if visiting.contains(&nested_name.as_str()) {
                return Err(Error::RecursiveRecord {
                    record: nested_name,
                    field: path.dotted(),
                });
            }

            let mut inner: Vec<&str> = visiting.to_vec();
            inner.push(&nested_name);

            return self
                .walk(nested, &path, &inner)
                .map(LayoutField::Record);
        }

        let primitive = Primitive::resolve(ty).ok_or_else(|| Error::UnsupportedType {
            ty: display_type(ty),
            field: path.dotted(),
        })?;

        let parser = primitive.metadata();
        let env_key = env_key(self.prefix, &path);
        let ids = error_ids(self.prefix, &path);

        tracing::trace!(field = %path, key = %env_key, ty = primitive.name(), "leaf");

        self.leaves.push(LeafFieldDescriptor {
            ty: ty.clone(),
            primitive,
            parser,
            env_key,
            missing_error: ids.missing,
            invalid_error: parser.can_fail.then_some(ids.invalid),
            path,
        });

        Ok(LayoutField::Leaf(self.leaves.len() - 1))
    }
}
