// Rust guideline compliant 2026-10-19

//! Configuration management for Gearloan.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "gearloan.toml";

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// Human-readable table format.
    #[default]
    Table,
    /// Plain text format.
    Plain,
}

impl std::str::FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            "plain" => Ok(OutputFormat::Plain),
            _ => Err(Error::InvalidConfig(format!(
                "output format must be json, table, or plain, got {}",
                s
            ))),
        }
    }
}

/// Configuration for Gearloan behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Seed file with the initial catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,

    /// Default output format for commands.
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Longest loan accepted, in days. Unset means no limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_loan_days: Option<u32>,

    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            output_format: OutputFormat::default(),
            max_loan_days: None,
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Loads configuration from file and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. The TOML file at `config_path`, if it exists
    /// 3. Environment variables with `GEARLOAN_` prefix
    ///
    /// A relative `catalog_path` in the file is resolved against the file's
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file exists but cannot be read
    /// - Configuration file contains invalid TOML
    /// - Configuration values fail validation
    pub fn load(config_path: &Path) -> Result<Self> {
        let mut config = Self::default();

        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            config = toml::from_str(&content)
                .map_err(|e| Error::InvalidConfig(format!("{}: {}", config_path.display(), e)))?;

            if let (Some(catalog), Some(dir)) = (&config.catalog_path, config_path.parent()) {
                if catalog.is_relative() {
                    config.catalog_path = Some(dir.join(catalog));
                }
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `GEARLOAN_CATALOG_PATH` - Seed file path
    /// - `GEARLOAN_OUTPUT_FORMAT` - Output format (json/table/plain)
    /// - `GEARLOAN_MAX_LOAN_DAYS` - Longest loan in days
    /// - `GEARLOAN_LOG_FILTER` - Default log filter
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable values are invalid.
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("GEARLOAN_CATALOG_PATH") {
            self.catalog_path = Some(PathBuf::from(val));
        }

        if let Ok(val) = std::env::var("GEARLOAN_OUTPUT_FORMAT") {
            self.output_format = val.parse()?;
        }

        if let Ok(val) = std::env::var("GEARLOAN_MAX_LOAN_DAYS") {
            self.max_loan_days = Some(val.parse().map_err(|_| {
                Error::InvalidConfig("GEARLOAN_MAX_LOAN_DAYS must be a positive number".to_string())
            })?);
        }

        if let Ok(val) = std::env::var("GEARLOAN_LOG_FILTER") {
            self.log_filter = val;
        }

        Ok(())
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - max_loan_days is zero
    /// - log_filter is blank
    fn validate(&self) -> Result<()> {
        if self.max_loan_days == Some(0) {
            return Err(Error::InvalidConfig(
                "max_loan_days must be greater than 0".to_string(),
            ));
        }

        if self.log_filter.trim().is_empty() {
            return Err(Error::InvalidConfig("log_filter cannot be empty".to_string()));
        }

        Ok(())
    }

    /// Saves the configuration to a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be created or written
    /// - Serialization fails
    pub fn save(&self, config_path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::InvalidConfig(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(config_path, content)?;
        Ok(())
    }
}
