//! Dashboard configuration: TOML file, environment overrides, validation.
//!
//! Every key is optional; an absent file means all defaults.
//!
//! ```toml
//! [provider]
//! base_url = "https://query1.finance.yahoo.com/v8/finance/chart"
//! user_agent = "Mozilla/5.0 (compatible; construction-dashboard)"
//! timeout_secs = 10
//! requests_per_minute = 30
//!
//! [display]
//! tail_rows = 5
//! currency_symbol = "R$"
//! column_mapping = "positional"   # or "by_name"
//! ```
//!
//! Resolution order for the file: `--config`, then `CONSTRUCTION_DASHBOARD_CONFIG`.
//! `CONSTRUCTION_DASHBOARD_BASE_URL` overrides `provider.base_url` afterwards.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared_utils::env::get_optional_env_var;
use thiserror::Error;
use tracing::debug;

use crate::normalizer::ColumnMapping;

/// Names the config file when `--config` is not given.
pub const CONFIG_PATH_ENV: &str = "CONSTRUCTION_DASHBOARD_CONFIG";
/// Overrides `provider.base_url`.
pub const BASE_URL_ENV: &str = "CONSTRUCTION_DASHBOARD_BASE_URL";

/// Errors related to loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct DashboardConfig {
    pub provider: ProviderConfig,
    pub display: DisplayConfig,
}

/// Quote provider connection settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct ProviderConfig {
    /// Chart endpoint; the symbol is appended as the last path segment.
    pub base_url: String,
    /// Sent with every request. The public endpoint rejects empty agents.
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Client-side throttle for outgoing requests.
    pub requests_per_minute: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com/v8/finance/chart".to_string(),
            user_agent: "Mozilla/5.0 (compatible; construction-dashboard)".to_string(),
            timeout_secs: 10,
            requests_per_minute: 30,
        }
    }
}

/// What the dashboard shows and how it shapes fetched tables.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct DisplayConfig {
    /// Rows shown in the price table, counted from the most recent.
    pub tail_rows: usize,
    /// Prefix for prices, e.g. `R$` for B3 listings.
    pub currency_symbol: String,
    pub column_mapping: ColumnMapping,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            tail_rows: 5,
            currency_symbol: "R$".to_string(),
            column_mapping: ColumnMapping::Positional,
        }
    }
}

impl DashboardConfig {
    /// Checks values serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("provider.base_url must not be empty".into()));
        }
        if self.provider.requests_per_minute == 0 {
            return Err(ConfigError::Invalid(
                "provider.requests_per_minute must be at least 1".into(),
            ));
        }
        if self.display.tail_rows == 0 {
            return Err(ConfigError::Invalid("display.tail_rows must be at least 1".into()));
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Some(url) = get_optional_env_var(BASE_URL_ENV) {
            debug!(%url, "base url overridden from environment");
            self.provider.base_url = url;
        }
    }
}

/// Parses and validates a config document.
pub fn load_config_str(s: &str) -> Result<DashboardConfig, ConfigError> {
    let config: DashboardConfig = toml::from_str(s)?;
    config.validate()?;
    Ok(config)
}

/// Reads, parses and validates a config file.
pub fn load_config_path(path: &Path) -> Result<DashboardConfig, ConfigError> {
    let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_str(&s)
}

/// Loads the effective configuration for a run.
///
/// `cli_path` wins over [`CONFIG_PATH_ENV`]; with neither, defaults are used.
/// Environment overrides are applied last and the result is re-validated.
pub fn resolve_config(cli_path: Option<&Path>) -> Result<DashboardConfig, ConfigError> {
    let env_path = get_optional_env_var(CONFIG_PATH_ENV).map(PathBuf::from);
    let mut config = match cli_path.or(env_path.as_deref()) {
        Some(path) => {
            debug!(path = %path.display(), "loading config file");
            load_config_path(path)?
        }
        None => DashboardConfig::default(),
    };
    config.apply_env_overrides();
    config.validate()?;
    Ok(config)
}
