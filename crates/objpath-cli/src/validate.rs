//! # Validate Subcommand
//!
//! Checks a document against a rule set file. Without `--all` the rule set
//! runs the way [`objpath_validate::validate`] does: the first hard failure
//! stops the run and the last rule decides the result. With `--all` every
//! rule runs and every failure is printed.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Args;

use objpath_validate::{validate, validate_all, RuleSet};

use crate::config::CliConfig;
use crate::document::load_document;

/// Arguments for `objpath validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// JSON or YAML document to check.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Rule set file (JSON or YAML). Defaults to `rules` from the config.
    #[arg(long, value_name = "RULES")]
    pub rules: Option<PathBuf>,

    /// Name prefixed to paths in failure messages. Defaults to
    /// `data_name` from the config.
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Run every rule and report all failures.
    #[arg(long)]
    pub all: bool,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when the document passes, 1 on validation failure.
/// Unreadable files and malformed rule sets are errors.
pub fn run_validate(args: &ValidateArgs, config: &CliConfig, out: &mut dyn Write) -> Result<u8> {
    let rules_path = args
        .rules
        .as_deref()
        .or(config.rules.as_deref())
        .ok_or_else(|| anyhow!("no rule set given; pass --rules or set 'rules' in the config file"))?;
    let data_name = args.name.as_deref().unwrap_or(&config.data_name);

    let data = load_document(&args.file)?;
    let rules = load_rules(rules_path)?;
    tracing::info!(rules = rules.len(), file = %args.file.display(), "validating");

    if args.all {
        let report = validate_all(&data, &rules, data_name)
            .with_context(|| format!("cannot validate {}", args.file.display()))?;
        writeln!(out, "{report}")?;
        return Ok(if report.is_valid() { 0 } else { 1 });
    }

    match validate(&data, &rules, data_name) {
        Ok(true) => {
            writeln!(out, "PASS: {}", args.file.display())?;
            Ok(0)
        }
        Ok(false) => {
            writeln!(out, "FAIL: {}", args.file.display())?;
            Ok(1)
        }
        Err(err) if err.is_validation() => {
            writeln!(out, "FAIL: {}: {err}", args.file.display())?;
            Ok(1)
        }
        Err(err) => {
            Err(err).with_context(|| format!("cannot validate {}", args.file.display()))
        }
    }
}

/// Load a rule set file.
pub fn load_rules(path: &Path) -> Result<RuleSet> {
    let document = load_document(path)?;
    RuleSet::from_value(&document).with_context(|| format!("invalid rule set {}", path.display()))
}
