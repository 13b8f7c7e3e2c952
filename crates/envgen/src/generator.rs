//! Generation pipeline and its builder.
//!
//! [`Generator`] is the entry point shared by the CLI, build scripts and
//! tests. It runs the pipeline in a fixed order:
//!
//! 1. parse the source and build the [`RecordCatalog`]
//! 2. [`flatten`] the root record into leaves
//! 3. check keys and identifiers for collisions
//! 4. [`render`] the loader module and the `.env` scaffold
//!
//! The result is a [`Generated`] value held in memory; nothing touches the
//! file system until one of its `write_*` methods is called.

use std::fs;
use std::path::Path;

use syn::{Meta, Path as SynPath};

use crate::catalog::RecordCatalog;
use crate::error::{Error, Result};
use crate::flatten::{LeafFieldDescriptor, flatten};
use crate::naming::normalize_prefix;
use crate::render::{RenderOptions, render};
use crate::scaffold::render_scaffold;
use crate::validate::check_unique;

/// Prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "APP";

/// Types path used when none is configured.
pub const DEFAULT_TYPES_PATH: &str = "super";

/// Builder for one generation run.
///
/// # Example
///
/// ```rust,ignore
/// // build.rs
/// fn main() -> miette::Result<()> {
///     let out_dir = std::env::var("OUT_DIR").unwrap();
///
///     envgen::Generator::new("Config")
///         .prefix("MYAPP")
///         .generate_file("src/config.rs")?
///         .write_module(format!("{out_dir}/config_gen.rs"))?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Generator {
    root: String,
    prefix: String,
    types_path: Option<String>,
    cfg: Option<String>,
}

impl Generator {
    /// Creates a generator for the struct named `root`.
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            prefix: DEFAULT_PREFIX.to_string(),
            types_path: Some(DEFAULT_TYPES_PATH.to_string()),
            cfg: None,
        }
    }

    /// Sets the project prefix every variable name starts with.
    ///
    /// The prefix is trimmed and upper-cased, so `myapp` gives `MYAPP_PORT`.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();

        self
    }

    /// Sets the module path the structs are imported from, e.g.
    /// `crate::config`.
    ///
    /// `self` means the loader is included into the module that declares
    /// the structs, and no import is emitted.
    pub fn types_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.types_path = (path.trim() != "self").then_some(path);

        self
    }

    /// Gates every generated item behind `#[cfg(<predicate>)]`.
    pub fn cfg(mut self, predicate: impl Into<String>) -> Self {
        self.cfg = Some(predicate.into());

        self
    }

    /// Generates the loader for a source text.
    ///
    /// `name` is only used in diagnostics, usually the file path.
    ///
    /// # Errors
    ///
    /// Any generation error except [`Error::Read`] and [`Error::Write`].
    pub fn generate_str(&self, name: &str, source: &str) -> Result<Generated> {
        let prefix = normalize_prefix(&self.prefix)?;
        let options = self.render_options()?;

        let catalog = RecordCatalog::parse(name, source)?;
        let flattened = flatten(&catalog, &self.root, &prefix)?;
        check_unique(&flattened.leaves)?;

        let module = render(&prefix, &flattened, &options)?;
        let scaffold = render_scaffold(&flattened.leaves);

        tracing::debug!(
            input = name,
            root = %self.root,
            prefix = %prefix,
            leaves = flattened.leaves.len(),
            "generated loader"
        );

        Ok(Generated {
            root: self.root.clone(),
            module,
            scaffold,
            leaves: flattened.leaves,
        })
    }

    /// Reads `path` and generates the loader for it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] if the file cannot be read, otherwise the same
    /// errors as [`generate_str`](Self::generate_str).
    pub fn generate_file(&self, path: impl AsRef<Path>) -> Result<Generated> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.display().to_string(),
            source,
        })?;

        self.generate_str(&path.display().to_string(), &source)
    }

    fn render_options(&self) -> Result<RenderOptions> {
        let types_path = self
            .types_path
            .as_deref()
            .map(|path| {
                syn::parse_str::<SynPath>(path).map_err(|err| Error::InvalidOption {
                    option: "types path",
                    value: path.to_string(),
                    message: err.to_string(),
                })
            })
            .transpose()?;

        let cfg = self
            .cfg
            .as_deref()
            .map(|predicate| {
                syn::parse_str::<Meta>(predicate).map_err(|err| Error::InvalidOption {
                    option: "cfg predicate",
                    value: predicate.to_string(),
                    message: err.to_string(),
                })
            })
            .transpose()?;

        Ok(RenderOptions { types_path, cfg })
    }
}

/// Output of one generation run.
#[derive(Clone, Debug)]
pub struct Generated {
    root: String,
    module: String,
    scaffold: String,
    leaves: Vec<LeafFieldDescriptor>,
}

impl Generated {
    /// The root struct the loader builds.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// The formatted loader module.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// The `.env` scaffold, one `KEY=` line per leaf.
    #[must_use]
    pub fn scaffold(&self) -> &str {
        &self.scaffold
    }

    /// The flattened leaves in load order.
    #[must_use]
    pub fn leaves(&self) -> &[LeafFieldDescriptor] {
        &self.leaves
    }

    /// Writes the loader module to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Write`] if the directories or the file cannot be
    /// created.
    pub fn write_module(&self, path: impl AsRef<Path>) -> Result<()> {
        write_output(path.as_ref(), &self.module)
    }

    /// Writes the `.env` scaffold to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Write`] if the directories or the file cannot be
    /// created.
    pub fn write_scaffold(&self, path: impl AsRef<Path>) -> Result<()> {
        write_output(path.as_ref(), &self.scaffold)
    }
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    let write_error = |source| Error::Write {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, contents).map_err(write_error)?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote output");
    Ok(())
}
