//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// No taxonomy file given on the command line or in settings.
    #[error("No taxonomy file. Pass --taxonomy or set taxonomy_file in the settings file.")]
    MissingTaxonomy,

    /// No holdings file given on the command line or in settings.
    #[error("No holdings file. Pass --holdings or set holdings_file in the settings file.")]
    MissingHoldings,

    /// No total portfolio value given on the command line or in settings.
    #[error("No total value. Pass --total-value or set total_value in the settings file.")]
    MissingTotalValue,

    /// Invalid total portfolio value.
    #[error("Invalid total value: {0}. Must be between 0 and 1e18.")]
    InvalidTotalValue(String),

    /// Settings file could not be parsed.
    #[error("Invalid settings file {path}: {reason}")]
    Settings {
        /// Settings file path.
        path: PathBuf,
        /// Parse failure.
        reason: String,
    },

    /// Settings file given explicitly but not found.
    #[error("Settings file not found: {0}")]
    SettingsNotFound(PathBuf),

    /// Refused to overwrite an existing file.
    #[error("{0} already exists. Use --force to overwrite.")]
    AlreadyExists(PathBuf),

    /// Asset is not held.
    #[error("Asset not in holdings: {0}")]
    NotHeld(String),

    /// Could not determine the user configuration directory.
    #[error("Could not determine config directory")]
    NoConfigDir,

    /// Engine error.
    #[error(transparent)]
    Strata(#[from] strata_portfolio::StrataError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
