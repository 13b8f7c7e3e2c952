//! # envgen
//!
//! Generates environment-variable loaders for plain configuration structs.
//!
//! `envgen` reads a Rust source file, finds the configuration struct you name,
//! and writes a Rust module with one function that fills that struct from the
//! process environment. The generated code has no dependencies and no
//! runtime reflection: it is checked in (or built into `OUT_DIR`) and
//! compiled with the rest of your crate.
//!
//! ## Quick Start
//!
//! Given `src/config.rs`:
//!
//! ```rust,ignore
//! pub struct Config {
//!     pub apikey: String,
//!     pub server: ServerConfig,
//!     pub debug: bool,
//! }
//!
//! pub struct ServerConfig {
//!     pub host: String,
//!     pub port: u16,
//!     pub shutdown_timeout: std::time::Duration,
//! }
//! ```
//!
//! running `envgen --path src/config.rs --project myapp` writes
//! `src/config_gen.rs` with:
//!
//! ```rust,ignore
//! pub const MYAPP_SERVER_PORT_ENV: &str = "MYAPP_SERVER_PORT";
//! // ...
//! pub enum ConfigEnvError { ErrMyappServerPortEnvMissing, ErrMyappServerPortEnvInvalid, /* ... */ }
//! pub struct ConfigLoadError { pub missing: Vec<ConfigEnvError>, pub invalid: Vec<ConfigEnvError> }
//! pub fn load_config() -> Result<Config, ConfigLoadError> { /* ... */ }
//! ```
//!
//! ## Naming
//!
//! Nested structs are flattened depth-first in declaration order. Each
//! variable name is the project prefix followed by the field path, with
//! every part upper-cased and stripped to letters and digits:
//!
//! | Field | Variable |
//! |-------|----------|
//! | `apikey` | `MYAPP_APIKEY` |
//! | `server.port` | `MYAPP_SERVER_PORT` |
//! | `server.shutdown_timeout` | `MYAPP_SERVER_SHUTDOWNTIMEOUT` |
//!
//! ## Error Reporting
//!
//! The generated loader never stops at the first problem. It visits every
//! variable and returns one error listing all missing and all malformed
//! variables:
//!
//! ```text
//! envs MYAPP_APIKEY,MYAPP_SERVER_HOST are not set; envs MYAPP_DEBUG have an invalid value
//! ```
//!
//! Generation itself reports problems as [`Error`], a [`miette::Diagnostic`]
//! with codes, help text and, for syntax errors, a labelled source snippet.
//!
//! ## Supported Field Types
//!
//! `String`, `bool`, `isize`, `i8`-`i64`, `usize`, `u8`-`u64`, `f32`, `f64`,
//! `std::time::Duration`, and structs declared in the same file. See
//! [`resolve`] for the parsing rules of each.
//!
//! ## Modules
//!
//! - [`catalog`]: collects the structs declared in a file
//! - [`flatten`]: expands nested structs into leaf fields
//! - [`naming`]: derives variable and identifier names
//! - [`resolve`]: maps field types to parsers
//! - [`render`]: renders the loader module
//! - [`generator`]: the pipeline and its builder

#![deny(missing_docs)]
#![warn(clippy::pedantic)]

pub mod catalog;
pub mod flatten;
pub mod generator;
pub mod naming;
pub mod path;
pub mod render;
pub mod resolve;
pub mod scaffold;
pub mod validate;

mod error;

pub use catalog::{FieldDecl, RecordCatalog, RecordDecl};
pub use error::{Error, Result};
pub use flatten::{Flattened, LayoutField, LeafFieldDescriptor, RecordLayout, flatten};
pub use generator::{Generated, Generator};
pub use path::FieldPath;
pub use render::{RenderOptions, render};
pub use resolve::{ParseOp, ParserMetadata, Primitive};

/// Re-export of [`miette`] so build scripts can return `miette::Result`.
pub use miette;
