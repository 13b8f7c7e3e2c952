//! Uniqueness checks over the flattened leaves.
//!
//! Name sanitization drops every non-alphanumeric character, so distinct
//! field paths can map to the same variable (`my_field` and `myfield` both
//! become `APP_MYFIELD`). A loader with such a collision would read one
//! variable for two fields, and in Rust it would not even compile because
//! the constants and sentinel variants would be declared twice. The
//! generator therefore rejects collisions before rendering anything.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::flatten::LeafFieldDescriptor;

/// Checks that keys, sentinel identifiers and local bindings are unique.
///
/// # Errors
///
/// - [`Error::DuplicateEnvKey`] when two leaves share an environment key
/// - [`Error::DuplicateIdentifier`] when two leaves share a sentinel or
///   binding identifier
pub fn check_unique(leaves: &[LeafFieldDescriptor]) -> Result<()> {
    let mut keys: HashMap<&str, &LeafFieldDescriptor> = HashMap::new();
    let mut idents: HashMap<String, &LeafFieldDescriptor> = HashMap::new();

    for leaf in leaves {
        if let Some(first) = keys.insert(&leaf.env_key, leaf) {
            return Err(Error::DuplicateEnvKey {
                key: leaf.env_key.clone(),
                first: first.name(),
                second: leaf.name(),
            });
        }

        let generated = std::iter::once(leaf.missing_error.clone())
            .chain(leaf.invalid_error.clone())
            .chain(std::iter::once(leaf.binding()));

        for ident in generated {
            if let Some(first) = idents.get(&ident) {
                return Err(Error::DuplicateIdentifier {
                    ident,
                    first: first.name(),
                    second: leaf.name(),
                });
            }
            idents.insert(ident, leaf);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RecordCatalog;
    use crate::flatten::flatten;

    fn leaves(source: &str) -> Vec<LeafFieldDescriptor> {
        let catalog = RecordCatalog::parse("config.rs", source).unwrap();
        flatten(&catalog, "Root", "APP").unwrap().leaves
    }

    #[test]
    fn test_distinct_fields_pass() {
        let leaves = leaves(
            "struct Root { host: String, server: Server }
             struct Server { host: String, port: u16 }",
        );
        assert!(check_unique(&leaves).is_ok());
    }

    #[test]
    fn test_sanitized_key_collision() {
        let leaves = leaves("struct Root { my_field: String, myfield: String }");
        let err = check_unique(&leaves).unwrap_err();

        match err {
            Error::DuplicateEnvKey { key, first, second } => {
                assert_eq!(key, "APP_MYFIELD");
                assert_eq!(first, "my_field");
                assert_eq!(second, "myfield");
            }
            other => panic!("expected DuplicateEnvKey, got {other:?}"),
        }
    }

    #[test]
    fn test_binding_collision_with_distinct_keys() {
        // APP_A_B and APP_AB differ, but both bind `val_a_b`
        let leaves = leaves(
            "struct Root { a: Inner, a_b: u8 }
             struct Inner { b: u8 }",
        );
        assert_ne!(leaves[0].env_key, leaves[1].env_key);

        let err = check_unique(&leaves).unwrap_err();
        assert!(matches!(err, Error::DuplicateIdentifier { .. }), "{err:?}");
    }
}
