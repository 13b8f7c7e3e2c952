//! Property-based tests for envgen invariants.
//!
//! These tests verify that naming and generation invariants hold for
//! arbitrary field names and struct shapes, not just hand-picked cases.

#![allow(clippy::pedantic)]

use proptest::prelude::*;

use envgen::naming::{env_key, error_ids};
use envgen::{FieldPath, Generator};

/// Field names that are valid, non-keyword Rust identifiers.
fn field_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,12}".prop_filter("must be an identifier", |name| {
        syn::parse_str::<syn::Ident>(name).is_ok()
    })
}

fn path_strategy() -> impl Strategy<Value = FieldPath> {
    prop::collection::vec(field_name(), 1..5)
        .prop_map(|segments| segments.into_iter().fold(FieldPath::root(), |p, s| p.child(s)))
}

// ============================================================================
// Naming Properties
// ============================================================================

mod naming_properties {
    use super::*;

    proptest! {
        /// Keys contain only upper-case letters, digits and separators
        #[test]
        fn env_key_charset(path in path_strategy()) {
            let key = env_key("APP", &path);
            prop_assert!(key.starts_with("APP_"));
            prop_assert!(key.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'));
        }

        /// One separator per segment boundary, never a trailing one
        #[test]
        fn env_key_separators(path in path_strategy()) {
            let key = env_key("APP", &path);
            prop_assert_eq!(key.matches('_').count(), path.len());
            prop_assert!(!key.ends_with('_'));
        }

        /// Error identifiers share a base and differ only in their role
        #[test]
        fn error_ids_pair(path in path_strategy()) {
            let ids = error_ids("APP", &path);
            let missing = ids.missing.strip_suffix("EnvMissing");
            let invalid = ids.invalid.strip_suffix("EnvInvalid");

            prop_assert!(missing.is_some());
            prop_assert_eq!(missing, invalid);
            prop_assert!(ids.missing.starts_with("ErrApp"));
            prop_assert!(syn::parse_str::<syn::Ident>(&ids.missing).is_ok());
        }

        /// Naming never panics on arbitrary segment text
        #[test]
        fn naming_never_panics(segments in prop::collection::vec(".*", 0..4), prefix in ".*") {
            let path = segments.into_iter().fold(FieldPath::root(), |p, s| p.child(s));
            let _ = env_key(&prefix, &path);
            let _ = error_ids(&prefix, &path);
        }
    }
}

// ============================================================================
// Generation Properties
// ============================================================================

mod generation_properties {
    use super::*;
    use std::collections::BTreeSet;

    const TYPES: &[&str] = &[
        "String", "bool", "isize", "i8", "i16", "i32", "i64", "usize", "u8", "u16", "u32", "u64",
        "f32", "f64", "std::time::Duration",
    ];

    /// A flat struct with distinct, collision-free field names.
    fn flat_struct() -> impl Strategy<Value = (Vec<String>, String)> {
        prop::collection::btree_map(field_name(), 0..TYPES.len(), 0..12).prop_map(|fields| {
            // Keep the first field of every sanitized key so nothing collides
            let mut seen = BTreeSet::new();
            let fields: Vec<(String, usize)> = fields
                .into_iter()
                .filter(|(name, _)| seen.insert(name.replace('_', "")))
                .collect();

            let body: Vec<String> = fields
                .iter()
                .map(|(name, ty)| format!("{name}: {}", TYPES[*ty]))
                .collect();
            let names = fields.into_iter().map(|(name, _)| name).collect();

            (names, format!("struct Config {{ {} }}", body.join(", ")))
        })
    }

    proptest! {
        /// Generation is deterministic and its output always parses
        #[test]
        fn generation_deterministic_and_valid((_, source) in flat_struct()) {
            let generator = Generator::new("Config");
            let first = generator.generate_str("config.rs", &source).unwrap();
            let second = generator.generate_str("config.rs", &source).unwrap();

            prop_assert_eq!(first.module(), second.module());
            prop_assert!(syn::parse_file(first.module()).is_ok());
        }

        /// Leaves come out in declaration order
        #[test]
        fn leaves_in_declaration_order((names, source) in flat_struct()) {
            let generated = Generator::new("Config").generate_str("config.rs", &source).unwrap();
            let leaves: Vec<String> = generated.leaves().iter().map(|l| l.name()).collect();
            prop_assert_eq!(leaves, names);
        }

        /// Generation returns an error instead of panicking on arbitrary input
        #[test]
        fn generation_never_panics(source in ".*") {
            let _ = Generator::new("Config").generate_str("fuzz.rs", &source);
        }
    }
}
