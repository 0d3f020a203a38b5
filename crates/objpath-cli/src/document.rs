//! # Document I/O
//!
//! Documents are JSON or YAML files, chosen by extension (`.yaml` / `.yml`
//! for YAML, anything else is JSON). YAML is converted to JSON values on
//! load, so every subcommand works on the same tree type.

use std::io::Write;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde_json::Value;

use objpath_validate::parse_yaml;

/// On-disk document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// JSON text.
    Json,
    /// YAML text.
    Yaml,
}

impl Format {
    /// The format implied by a file's extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Format::Yaml
            }
            _ => Format::Json,
        }
    }
}

/// Read and parse a document.
pub fn load_document(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value = match Format::from_path(path) {
        Format::Json => serde_json::from_str(&text)
            .with_context(|| format!("failed to parse JSON in {}", path.display()))?,
        Format::Yaml => parse_yaml(&text)
            .map_err(|reason| anyhow!(reason))
            .with_context(|| format!("failed to parse YAML in {}", path.display()))?,
    };
    tracing::debug!(path = %path.display(), "loaded document");
    Ok(value)
}

/// Render a value in `format`.
pub fn render(value: &Value, format: Format, pretty: bool) -> Result<String> {
    let text = match format {
        Format::Json if pretty => serde_json::to_string_pretty(value)?,
        Format::Json => serde_json::to_string(value)?,
        Format::Yaml => serde_yaml::to_string(value)?,
    };
    Ok(text)
}

/// Write a document to `output`, or as JSON to `out` when no output file
/// is given.
pub fn write_document(
    value: &Value,
    output: Option<&Path>,
    pretty: bool,
    out: &mut dyn Write,
) -> Result<()> {
    match output {
        Some(path) => {
            let mut text = render(value, Format::from_path(path), pretty)?;
            if !text.ends_with('\n') {
                text.push('\n');
            }
            std::fs::write(path, text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote document");
        }
        None => writeln!(out, "{}", render(value, Format::Json, pretty)?)?,
    }
    Ok(())
}

/// Interpret a command-line value: JSON when it parses, otherwise a bare
/// string.
pub fn parse_cli_value(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
