//! # objpath CLI entry point
//!
//! Parses command-line arguments, loads the config file and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use objpath_cli::access::{run_equal, run_get, run_leaves, run_paths};
use objpath_cli::access::{EqualArgs, GetArgs, LeavesArgs, PathsArgs};
use objpath_cli::config::CliConfig;
use objpath_cli::mutate::{run_set, run_set_all, SetAllArgs, SetArgs};
use objpath_cli::validate::{run_validate, ValidateArgs};
use objpath_cli::EXIT_ERROR;

/// Dotted-path access, updates and validation for JSON and YAML documents.
#[derive(Parser, Debug)]
#[command(name = "objpath", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file. Defaults to ./objpath.yaml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON on a single line.
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the accessor path of every leaf.
    Paths(PathsArgs),

    /// Print every leaf in depth-first order.
    Leaves(LeavesArgs),

    /// Print the value at an accessor path.
    Get(GetArgs),

    /// Write a value at an accessor path, creating missing segments.
    Set(SetArgs),

    /// Apply a map of accessor path to value.
    SetAll(SetAllArgs),

    /// Compare two documents leaf by leaf.
    Equal(EqualArgs),

    /// Check a document against a rule set.
    Validate(ValidateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG, when set, takes precedence over -v.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut config = match CliConfig::load(cli.config.as_deref(), &cwd) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(EXIT_ERROR);
        }
    };
    if cli.compact {
        config.pretty = false;
    }
    tracing::debug!(?config, "effective configuration");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let result = match cli.command {
        Commands::Paths(args) => run_paths(&args, &mut out),
        Commands::Leaves(args) => run_leaves(&args, &mut out),
        Commands::Get(args) => run_get(&args, &config, &mut out),
        Commands::Set(args) => run_set(&args, &config, &mut out),
        Commands::SetAll(args) => run_set_all(&args, &config, &mut out),
        Commands::Equal(args) => run_equal(&args, &mut out),
        Commands::Validate(args) => run_validate(&args, &config, &mut out),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
