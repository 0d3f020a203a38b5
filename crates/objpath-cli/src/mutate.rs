//! # Write Subcommands
//!
//! `set` and `set-all` load a document, apply path writes, and print the
//! result (or write it to `--output`). The input file is never rewritten
//! unless it is also named as the output.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use objpath_core::{safe_set, safe_set_all, SetOp, SetOutcome};

use crate::config::CliConfig;
use crate::document::{load_document, parse_cli_value, write_document};

/// Arguments for `objpath set`.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// JSON or YAML document.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Dotted accessor path. Missing segments are created.
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Value to write (JSON, or a bare string).
    #[arg(value_name = "VALUE")]
    pub value: String,

    /// Operation applied at the path: set, add, sub, mult or div.
    #[arg(long, default_value = "set")]
    pub op: SetOp,

    /// Write the result here instead of stdout. Format follows the extension.
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for `objpath set-all`.
#[derive(Args, Debug)]
pub struct SetAllArgs {
    /// JSON or YAML document.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// JSON or YAML map of accessor path to value.
    #[arg(value_name = "ASSIGNMENTS")]
    pub assignments: PathBuf,

    /// Write the result here instead of stdout. Format follows the extension.
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Apply one write.
///
/// Returns exit code 0 when applied, 1 when the write was rejected. A
/// rejected write produces no output.
pub fn run_set(args: &SetArgs, config: &CliConfig, out: &mut dyn Write) -> Result<u8> {
    let mut data = load_document(&args.file)?;
    let value = parse_cli_value(&args.value);

    let outcome = safe_set(&mut data, &args.path, value, args.op)
        .with_context(|| format!("cannot write into {}", args.file.display()))?;
    if let SetOutcome::Rejected(rejection) = outcome {
        tracing::warn!(path = %args.path, "write rejected: {rejection}");
        return Ok(1);
    }

    write_document(&data, args.output.as_deref(), config.pretty, out)?;
    Ok(0)
}

/// Apply every assignment in order.
///
/// Individual rejections are skipped. Returns exit code 0.
pub fn run_set_all(args: &SetAllArgs, config: &CliConfig, out: &mut dyn Write) -> Result<u8> {
    let mut data = load_document(&args.file)?;
    let assignments = load_document(&args.assignments)?;

    safe_set_all(&mut data, &assignments).with_context(|| {
        format!(
            "cannot apply {} to {}",
            args.assignments.display(),
            args.file.display()
        )
    })?;

    write_document(&data, args.output.as_deref(), config.pretty, out)?;
    Ok(0)
}
