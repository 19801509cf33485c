//! Configuration file support for lockfile-tree.
//!
//! Provides YAML-based configuration through `lockfile-tree.config.yml` files,
//! including data structures, file loading, validation and merging with
//! command-line options.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::adapters::outbound::runtime::DEFAULT_YIELD_THRESHOLD;
use crate::application::dto::OutputFormat;
use crate::application::services::DEFAULT_CONCURRENCY;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "lockfile-tree.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub concurrency: Option<usize>,
    pub yield_threshold_ms: Option<u64>,
    pub max_tree_size: Option<usize>,
    pub format: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Settings after merging CLI flags, the config file and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub concurrency: usize,
    pub yield_threshold: Duration,
    pub max_tree_size: Option<usize>,
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            yield_threshold: DEFAULT_YIELD_THRESHOLD,
            max_tree_size: None,
            format: OutputFormat::default(),
        }
    }
}

/// Values given on the command line; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub concurrency: Option<usize>,
    pub yield_threshold_ms: Option<u64>,
    pub max_tree_size: Option<usize>,
    pub format: Option<OutputFormat>,
}

impl Settings {
    /// CLI flags win over the config file, which wins over defaults.
    pub fn resolve(config: Option<&ConfigFile>, cli: &CliOverrides) -> Result<Self> {
        let defaults = Settings::default();

        let config_format = match config.and_then(|c| c.format.as_deref()) {
            Some(format) => Some(OutputFormat::from_str(format).map_err(|e| {
                anyhow::anyhow!(
                    "Invalid config: {}\n\n💡 Hint: Set 'format' to json or text.",
                    e
                )
            })?),
            None => None,
        };

        let concurrency = cli
            .concurrency
            .or(config.and_then(|c| c.concurrency))
            .unwrap_or(defaults.concurrency);
        if concurrency == 0 {
            bail!(
                "Invalid concurrency: 0.\n\n💡 Hint: Concurrency must be at least 1 (default {}).",
                DEFAULT_CONCURRENCY
            );
        }

        let yield_threshold = cli
            .yield_threshold_ms
            .or(config.and_then(|c| c.yield_threshold_ms))
            .map(Duration::from_millis)
            .unwrap_or(defaults.yield_threshold);

        Ok(Self {
            concurrency,
            yield_threshold,
            max_tree_size: cli
                .max_tree_size
                .or(config.and_then(|c| c.max_tree_size)),
            format: cli.format.or(config_format).unwrap_or(defaults.format),
        })
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.concurrency == Some(0) {
        bail!(
            "Invalid config: concurrency must be at least 1.\n\n\
             💡 Hint: Remove the field to use the default of {}.",
            DEFAULT_CONCURRENCY
        );
    }
    if config.max_tree_size == Some(0) {
        bail!(
            "Invalid config: max_tree_size must be at least 1.\n\n\
             💡 Hint: Remove the field to disable the limit."
        );
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
