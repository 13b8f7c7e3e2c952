//! `envgen` command line tool.
//!
//! Reads a Rust source file, generates the environment loader for one of its
//! structs and writes it next to the input (or wherever `--output` says).

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::Parser;
use miette::{IntoDiagnostic, WrapErr};

use envgen::Generator;

/// File name of the module when `--output` is not given.
const DEFAULT_OUTPUT: &str = "config_gen.rs";

/// Generate an environment variable loader for a config struct.
#[derive(Parser, Debug)]
#[command(name = "envgen", version)]
#[command(about = "Generate an environment variable loader for a config struct")]
struct Args {
    /// Rust source file declaring the config struct
    #[arg(long, env = "ENVGEN_FILE", value_name = "FILE")]
    path: PathBuf,

    /// Name of the root config struct
    #[arg(long = "struct", value_name = "NAME", default_value = "Config")]
    root: String,

    /// Prefix of every variable name [default: current directory name]
    #[arg(long, value_name = "PREFIX")]
    project: Option<String>,

    /// Where to write the loader module [default: config_gen.rs beside the input]
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Also write a .env scaffold listing every variable
    #[arg(long, value_name = "FILE")]
    env: Option<PathBuf>,

    /// Module path the structs are imported from; `self` disables the import
    #[arg(long, value_name = "PATH", default_value = envgen::generator::DEFAULT_TYPES_PATH)]
    types_path: String,

    /// Gate every generated item behind #[cfg(PREDICATE)]
    #[arg(long, value_name = "PREDICATE")]
    cfg: Option<String>,

    /// Debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> miette::Result<()> {
    let args = Args::parse();

    setup_tracing(args.debug);

    let project = match args.project {
        Some(project) => project,
        None => default_project()?,
    };
    let output = output_path(&args.path, args.output.as_deref());

    tracing::debug!(
        input = %args.path.display(),
        output = %output.display(),
        root = %args.root,
        project = %project,
        "starting generation"
    );

    let mut generator = Generator::new(&args.root)
        .prefix(project)
        .types_path(args.types_path);
    if let Some(cfg) = args.cfg {
        generator = generator.cfg(cfg);
    }

    let generated = generator.generate_file(&args.path)?;
    generated.write_module(&output)?;

    if let Some(env) = &args.env {
        generated.write_scaffold(env)?;
    }

    tracing::info!(
        output = %output.display(),
        vars = generated.leaves().len(),
        "wrote loader for {}",
        args.root
    );

    Ok(())
}

fn setup_tracing(debug: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("envgen=debug,info")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Name of the working directory, the default project prefix.
fn default_project() -> miette::Result<String> {
    let cwd = std::env::current_dir()
        .into_diagnostic()
        .wrap_err("failed to determine the current directory")?;

    Ok(cwd
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default())
}

/// Resolves the module path: `--output` with `.rs` appended if missing, or
/// `config_gen.rs` in the input's directory.
fn output_path(input: &Path, output: Option<&Path>) -> PathBuf {
    let Some(output) = output else {
        let dir = input.parent().unwrap_or_else(|| Path::new(""));
        return dir.join(DEFAULT_OUTPUT);
    };

    if output.extension().is_some_and(|ext| ext == "rs") {
        return output.to_path_buf();
    }

    let mut name = OsString::from(output.as_os_str());
    name.push(".rs");
    PathBuf::from(name)
}
