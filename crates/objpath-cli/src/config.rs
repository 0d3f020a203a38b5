//! # CLI Configuration
//!
//! Optional defaults read from a YAML (or JSON) file. The file is taken
//! from `--config`, or from `objpath.yaml` in the working directory when
//! present. Every field has a default, so an empty file is valid and a
//! missing file means all defaults. Command-line flags override the file.
//!
//! ```yaml
//! data_name: config
//! pretty: false
//! rules: rules/service.yaml
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use objpath_validate::DEFAULT_DATA_NAME;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "objpath.yaml";

/// Defaults shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Name prefixed to accessor paths in validation messages.
    pub data_name: String,
    /// Pretty-print JSON output.
    pub pretty: bool,
    /// Rule set used by `validate` when `--rules` is not given. Relative
    /// paths resolve against the config file's directory.
    pub rules: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_name: DEFAULT_DATA_NAME.to_string(),
            pretty: true,
            rules: None,
        }
    }
}

impl CliConfig {
    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one, `objpath.yaml` under
    /// `cwd` is used if present, otherwise defaults.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = cwd.join(DEFAULT_CONFIG_FILE);
                if !candidate.is_file() {
                    tracing::debug!("no config file; using defaults");
                    return Ok(Self::default());
                }
                candidate
            }
        };
        Self::from_file(&path)
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let mut config = Self::from_yaml_str(&text)
            .with_context(|| format!("invalid config file {}", path.display()))?;

        if let (Some(rules), Some(dir)) = (&config.rules, path.parent()) {
            if rules.is_relative() {
                config.rules = Some(dir.join(rules));
            }
        }
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Parse config text. An empty document yields the defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }
}
