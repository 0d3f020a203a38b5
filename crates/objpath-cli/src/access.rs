//! # Read Subcommands
//!
//! `paths`, `leaves`, `get` and `equal`. None of these modify the input
//! document.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use objpath_core::{accessor_list, depth_traverse, safe_access, safe_equal};

use crate::config::CliConfig;
use crate::document::{load_document, parse_cli_value, render, Format};

/// Arguments for `objpath paths`.
#[derive(Args, Debug)]
pub struct PathsArgs {
    /// JSON or YAML document.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Arguments for `objpath leaves`.
#[derive(Args, Debug)]
pub struct LeavesArgs {
    /// JSON or YAML document.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Arguments for `objpath get`.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// JSON or YAML document.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Dotted accessor path, e.g. `level1.array1.0`.
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Value printed when the path is missing (JSON, or a bare string).
    #[arg(long, value_name = "VALUE")]
    pub default: Option<String>,
}

/// Arguments for `objpath equal`.
#[derive(Args, Debug)]
pub struct EqualArgs {
    /// Document whose leaves are compared.
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Document compared against.
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Also compare TARGET's leaves against SOURCE.
    #[arg(long)]
    pub symmetric: bool,
}

/// Print every accessor path, one per line.
///
/// Returns exit code 0.
pub fn run_paths(args: &PathsArgs, out: &mut dyn Write) -> Result<u8> {
    let data = load_document(&args.file)?;
    let accessors = accessor_list(&data)
        .with_context(|| format!("cannot list paths of {}", args.file.display()))?;
    for accessor in &accessors {
        writeln!(out, "{accessor}")?;
    }
    tracing::info!(count = accessors.len(), "listed accessor paths");
    Ok(0)
}

/// Print every leaf as compact JSON, one per line, in traversal order.
///
/// Returns exit code 0.
pub fn run_leaves(args: &LeavesArgs, out: &mut dyn Write) -> Result<u8> {
    let data = load_document(&args.file)?;
    let mut lines = Vec::new();
    depth_traverse(&data, |leaf| lines.push(leaf.to_string()))
        .with_context(|| format!("cannot traverse {}", args.file.display()))?;
    for line in &lines {
        writeln!(out, "{line}")?;
    }
    Ok(0)
}

/// Print the value at a path.
///
/// Returns exit code 0 when a value (or the default) was printed, 1 when
/// the path is missing and no default was given.
pub fn run_get(args: &GetArgs, config: &CliConfig, out: &mut dyn Write) -> Result<u8> {
    let data = load_document(&args.file)?;
    let default = args.default.as_deref().map(parse_cli_value);

    let value = match (safe_access(&data, &args.path), &default) {
        (Some(value), _) => value,
        (None, Some(default)) => default,
        (None, None) => {
            tracing::warn!(path = %args.path, "no value at path");
            return Ok(1);
        }
    };
    writeln!(out, "{}", render(value, Format::Json, config.pretty)?)?;
    Ok(0)
}

/// Compare two documents leaf by leaf.
///
/// Returns exit code 0 when equal, 1 otherwise.
pub fn run_equal(args: &EqualArgs, out: &mut dyn Write) -> Result<u8> {
    let source = load_document(&args.source)?;
    let target = load_document(&args.target)?;

    let equal = safe_equal(&source, &target) && (!args.symmetric || safe_equal(&target, &source));
    writeln!(out, "{}", if equal { "equal" } else { "different" })?;
    Ok(if equal { 0 } else { 1 })
}
