//! Settings file.
//!
//! A TOML file holding defaults for the input files, the total portfolio
//! value and the aggregation options. Command-line flags override it.

use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use strata_portfolio::AggregationConfig;

use crate::error::{CliError, CliResult};

/// File name of the settings file inside the config directory.
pub const SETTINGS_FILE: &str = "strata.toml";

/// CLI settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Default taxonomy file (CSV or JSON)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxonomy_file: Option<PathBuf>,

    /// Default holdings file (JSON)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holdings_file: Option<PathBuf>,

    /// Default total portfolio value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_value: Option<Decimal>,

    /// Table view and allocation tolerance
    #[serde(default)]
    pub aggregation: AggregationConfig,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::Settings {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Loads settings from an explicit path, or from the default location.
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    pub fn load(explicit: Option<&Path>) -> CliResult<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(CliError::SettingsNotFound(path.to_path_buf()));
            }
            debug!(path = %path.display(), "loading settings");
            return Self::from_file(path);
        }

        match default_path() {
            Ok(path) if path.exists() => {
                debug!(path = %path.display(), "loading settings");
                Self::from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Renders the settings as TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Serialization(e.to_string()))
    }
}

/// Default settings file path under the user config directory.
pub fn default_path() -> CliResult<PathBuf> {
    let base = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or(CliError::NoConfigDir)?;
    Ok(base.join("strata").join(SETTINGS_FILE))
}

/// Resolves the settings path for display and `config init`.
pub fn resolve_path(explicit: Option<&Path>) -> CliResult<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => default_path(),
    }
}
