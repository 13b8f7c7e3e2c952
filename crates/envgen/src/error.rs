//! Error types for loader generation.
//!
//! Every failure the generator can hit is fatal for the current run: there is
//! no partial output and nothing is retried. All variants integrate with
//! [`miette`], so the CLI can render them with codes, help text and, for
//! parse failures, a labelled snippet of the offending source.
//!
//! # Error Variants
//!
//! | Variant | When It Occurs |
//! |---------|----------------|
//! | [`Error::Parse`] | The input is not valid Rust source |
//! | [`Error::RecordNotFound`] | The requested root struct is not declared in the file |
//! | [`Error::UnsupportedType`] | A leaf field has a type with no parser |
//! | [`Error::RecursiveRecord`] | A struct contains itself (directly or transitively) |
//! | [`Error::EmptyPrefix`] | The project prefix has no usable characters |
//! | [`Error::InvalidIdentifier`] | A derived name is not a valid Rust identifier |
//! | [`Error::DuplicateEnvKey`] | Two fields sanitize to the same variable name |
//! | [`Error::DuplicateIdentifier`] | Two fields produce the same generated identifier |
//! | [`Error::InvalidOption`] | A types path or cfg predicate is not valid syntax |
//! | [`Error::Render`] | The rendered module failed to re-parse |
//! | [`Error::Read`] / [`Error::Write`] | File I/O around the generator failed |

use std::io;

use miette::{Diagnostic, NamedSource, SourceSpan};

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating a loader.
#[derive(Debug, Diagnostic, thiserror::Error)]
pub enum Error {
    /// The input file could not be parsed as Rust.
    #[error("failed to parse {name}")]
    #[diagnostic(
        code(envgen::parse_error),
        help("the input must be a Rust source file declaring the config struct")
    )]
    Parse {
        /// Display name of the input (usually its path).
        name: String,

        /// The source text for snippet rendering.
        #[source_code]
        src: NamedSource<String>,

        /// Location of the syntax error.
        #[label("{message}")]
        span: SourceSpan,

        /// Message reported by the parser.
        message: String,
    },

    /// The root struct is not declared at the top level of the input.
    #[error("struct `{name}` not found")]
    #[diagnostic(code(envgen::record_not_found))]
    RecordNotFound {
        /// The requested struct name.
        name: String,

        /// Lists the structs that were found.
        #[help]
        help: String,
    },

    /// A leaf field's type has no entry in the parser table.
    #[error("unsupported type `{ty}` for field `{field}`")]
    #[diagnostic(
        code(envgen::unsupported_type),
        help(
            "supported types are String, bool, isize, i8-i64, usize, u8-u64, f32, f64, \
             Duration and structs declared in the same file"
        )
    )]
    UnsupportedType {
        /// The declared type as written.
        ty: String,

        /// Dotted path of the field.
        field: String,
    },

    /// A struct contains itself, so flattening would never terminate.
    #[error("struct `{record}` contains itself through field `{field}`")]
    #[diagnostic(code(envgen::recursive_record))]
    RecursiveRecord {
        /// The struct that recurses.
        record: String,

        /// Dotted path of the field closing the cycle.
        field: String,
    },

    /// The project prefix is empty once normalized.
    #[error("project prefix must not be empty")]
    #[diagnostic(
        code(envgen::empty_prefix),
        help("pass --project with at least one letter or digit")
    )]
    EmptyPrefix,

    /// A derived name cannot be used as a Rust identifier.
    #[error("`{name}` derived from `{field}` is not a valid Rust identifier")]
    #[diagnostic(
        code(envgen::invalid_identifier),
        help("environment variable names must start with a letter; check the project prefix")
    )]
    InvalidIdentifier {
        /// The offending identifier.
        name: String,

        /// Dotted path of the field it was derived from.
        field: String,
    },

    /// Two fields map to the same environment variable.
    #[error("fields `{first}` and `{second}` both map to environment variable {key}")]
    #[diagnostic(
        code(envgen::duplicate_env_key),
        help("variable names keep only letters and digits of each field name; rename one field")
    )]
    DuplicateEnvKey {
        /// The colliding variable name.
        key: String,

        /// The field that claimed the key first.
        first: String,

        /// The field that collided with it.
        second: String,
    },

    /// Two fields map to the same generated identifier.
    #[error("fields `{first}` and `{second}` both generate identifier `{ident}`")]
    #[diagnostic(code(envgen::duplicate_identifier), help("rename one of the fields"))]
    DuplicateIdentifier {
        /// The colliding identifier.
        ident: String,

        /// The field that claimed the identifier first.
        first: String,

        /// The field that collided with it.
        second: String,
    },

    /// A generator option does not parse as the Rust syntax it stands for.
    #[error("invalid {option} `{value}`: {message}")]
    #[diagnostic(
        code(envgen::invalid_option),
        help("types paths look like `super` or `crate::config`, cfg predicates like `feature = \"env\"`")
    )]
    InvalidOption {
        /// Which option was rejected.
        option: &'static str,

        /// The value as given.
        value: String,

        /// Message reported by the parser.
        message: String,
    },

    /// The rendered token stream is not a valid Rust file.
    #[error("generated loader for `{root}` is not valid Rust")]
    #[diagnostic(code(envgen::render_error))]
    Render {
        /// The root struct being rendered.
        root: String,

        /// The parser error on the rendered tokens.
        #[source]
        source: syn::Error,
    },

    /// Reading the input file failed.
    #[error("failed to read {path}")]
    #[diagnostic(
        code(envgen::read_error),
        help("check that the file exists and is readable")
    )]
    Read {
        /// Path of the input file.
        path: String,

        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Creating or writing an output file failed.
    #[error("failed to write {path}")]
    #[diagnostic(
        code(envgen::write_error),
        help("check that the output directory is writable")
    )]
    Write {
        /// Path of the output file.
        path: String,

        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Builds a [`Error::Parse`] pointing at the span reported by `syn`.
    pub fn parse(name: impl Into<String>, source: &str, err: &syn::Error) -> Self {
        let name = name.into();
        let start = err.span().start();
        let offset = line_col_to_offset(source, start.line, start.column);

        Error::Parse {
            src: NamedSource::new(name.clone(), source.to_string()),
            span: offset_to_span(offset, source),
            message: err.to_string(),
            name,
        }
    }

    /// Builds a [`Error::RecordNotFound`] listing the available structs.
    pub fn record_not_found<'a>(
        name: impl Into<String>,
        available: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let available: Vec<&str> = available.into_iter().collect();
        let help = if available.is_empty() {
            "the file declares no structs with named fields".to_string()
        } else {
            format!("structs declared in the file: {}", available.join(", "))
        };

        Error::RecordNotFound {
            name: name.into(),
            help,
        }
    }
}

/// Convert a line (1-indexed) and a column (0-indexed, in chars) to a byte offset.
fn line_col_to_offset(content: &str, line: usize, column: usize) -> usize {
    let mut offset = 0;

    for (i, l) in content.split_inclusive('\n').enumerate() {
        if (i + 1) == line {
            let within = l
                .char_indices()
                .nth(column)
                .map_or(l.trim_end_matches('\n').len(), |(idx, _)| idx);
            return offset + within;
        }

        offset += l.len();
    }

    offset
}

/// Spans the token starting at `offset`, at least one byte wide.
fn offset_to_span(offset: usize, content: &str) -> SourceSpan {
    let offset = offset.min(content.len());
    let remaining = content.get(offset..).unwrap_or_default();
    let len = match remaining.find(char::is_whitespace) {
        Some(0) => remaining.chars().next().map_or(0, char::len_utf8),
        Some(len) => len,
        None => remaining.len(),
    };

    SourceSpan::new(offset.into(), len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_to_offset() {
        let content = "struct A {\n    x: u8,\n}\n";
        assert_eq!(line_col_to_offset(content, 1, 0), 0);
        assert_eq!(line_col_to_offset(content, 2, 4), 15);
        assert_eq!(line_col_to_offset(content, 3, 0), 22);
    }

    #[test]
    fn test_line_col_past_end_clamps() {
        let content = "struct A;";
        assert_eq!(line_col_to_offset(content, 5, 0), content.len());
    }

    #[test]
    fn test_parse_error_points_at_token() {
        let source = "struct Config {\n    port: u16\n    host: String,\n}\n";
        let err = syn::parse_file(source).expect_err("missing comma must not parse");
        let err = Error::parse("config.rs", source, &err);

        let Error::Parse { span, name, .. } = &err else {
            panic!("expected Parse variant, got {err:?}");
        };
        assert_eq!(name, "config.rs");
        assert!(span.offset() > 0);
        assert!(span.offset() < source.len());
        assert!(err.to_string().contains("config.rs"));
    }

    #[test]
    fn test_record_not_found_help() {
        let err = Error::record_not_found("Config", ["Server", "Database"]);
        let Error::RecordNotFound { help, .. } = &err else {
            panic!("expected RecordNotFound variant");
        };
        assert!(help.contains("Server, Database"));
        assert_eq!(err.to_string(), "struct `Config` not found");

        let err = Error::record_not_found("Config", []);
        let Error::RecordNotFound { help, .. } = &err else {
            panic!("expected RecordNotFound variant");
        };
        assert!(help.contains("no structs"));
    }

    #[test]
    fn test_diagnostic_codes() {
        let err = Error::UnsupportedType {
            ty: "Vec<u8>".to_string(),
            field: "server.ports".to_string(),
        };
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("envgen::unsupported_type"));
        assert_eq!(
            err.to_string(),
            "unsupported type `Vec<u8>` for field `server.ports`"
        );
    }
}
