//! Name derivation for generated identifiers.
//!
//! All functions here are pure: the same prefix and path always produce the
//! same names, which is what keeps generated output byte-stable.
//!
//! # Environment keys
//!
//! The prefix and every path segment keep only letters (upper-cased) and
//! digits, and are joined with `_`:
//!
//! | Prefix | Path | Key |
//! |--------|------|-----|
//! | `APP` | `app_name` | `APP_APPNAME` |
//! | `APP` | `server.port` | `APP_SERVER_PORT` |
//! | `myapp` | `port32` | `MYAPP_PORT32` |
//!
//! Dropping separators inside a segment means `my_field` and `myfield`
//! share a key; the generator rejects such collisions before rendering.
//!
//! # Error identifiers
//!
//! `Err`, then each segment with its first letter upper-cased and the rest
//! lower-cased, then `EnvMissing` or `EnvInvalid`:
//! `APP` + `server.port` gives `ErrAppServerPortEnvMissing`.

use heck::ToSnakeCase;

use crate::error::{Error, Result};
use crate::path::FieldPath;

/// Separator placed between segments of an environment key.
pub const KEY_SEPARATOR: char = '_';

/// Suffix appended to environment keys to name their constants.
pub const CONST_SUFFIX: &str = "_ENV";

/// Marker starting every error identifier.
const ERROR_MARKER: &str = "Err";

/// Role suffix of the "variable not set" error identifier.
const MISSING_ROLE: &str = "EnvMissing";

/// Role suffix of the "variable malformed" error identifier.
const INVALID_ROLE: &str = "EnvInvalid";

/// The pair of error identifiers derived for one leaf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorIds {
    /// Identifier of the "not set" sentinel.
    pub missing: String,

    /// Identifier of the "malformed" sentinel.
    pub invalid: String,
}

/// Upper-cases and trims a project prefix.
///
/// # Errors
///
/// Returns [`Error::EmptyPrefix`] when nothing remains after trimming.
pub fn normalize_prefix(prefix: &str) -> Result<String> {
    let prefix = prefix.trim().to_uppercase();

    if prefix.chars().any(char::is_alphanumeric) {
        Ok(prefix)
    } else {
        Err(Error::EmptyPrefix)
    }
}

/// Derives the environment variable name for a leaf.
pub fn env_key(prefix: &str, path: &FieldPath) -> String {
    let mut key = String::new();

    for part in std::iter::once(prefix).chain(path.segments()) {
        for c in part.chars() {
            if c.is_numeric() {
                key.push(c);
            } else if c.is_alphabetic() {
                key.extend(c.to_uppercase());
            }
        }
        key.push(KEY_SEPARATOR);
    }

    if key.ends_with(KEY_SEPARATOR) {
        key.pop();
    }

    key
}

/// Derives the missing/invalid error identifiers for a leaf.
pub fn error_ids(prefix: &str, path: &FieldPath) -> ErrorIds {
    let mut base = String::from(ERROR_MARKER);

    for part in std::iter::once(prefix).chain(path.segments()) {
        for (i, c) in part.char_indices() {
            if c.is_numeric() {
                base.push(c);
            } else if c.is_alphabetic() && i == 0 {
                base.extend(c.to_uppercase());
            } else if c.is_alphabetic() {
                base.extend(c.to_lowercase());
            }
        }
    }

    ErrorIds {
        missing: format!("{base}{MISSING_ROLE}"),
        invalid: format!("{base}{INVALID_ROLE}"),
    }
}

/// Name of the constant holding an environment key.
pub fn const_name(key: &str) -> String {
    format!("{key}{CONST_SUFFIX}")
}

/// Name of the generated load function: `load_` plus the snake-cased root.
pub fn loader_fn_name(root: &str) -> String {
    format!("load_{}", root.to_snake_case())
}

/// Name of the generated sentinel error enum.
pub fn sentinel_enum_name(root: &str) -> String {
    format!("{root}EnvError")
}

/// Name of the generated combined error struct.
pub fn load_error_name(root: &str) -> String {
    format!("{root}LoadError")
}
