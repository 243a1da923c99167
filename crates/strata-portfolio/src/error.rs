//! Error types for classification rollups.
//!
//! Aggregation and resolution are total; errors only arise while building
//! inputs (holdings mutation, taxonomy loading) or writing exports.

use thiserror::Error;

/// Result type for strata operations.
pub type StrataResult<T> = Result<T, StrataError>;

/// Errors that can occur while preparing inputs or writing outputs.
#[derive(Error, Debug)]
#[allow(missing_docs)]
pub enum StrataError {
    /// Allocation outside the 0-100 range.
    #[error("Invalid allocation for '{asset}': {value} (must be between 0 and 100)")]
    InvalidAllocation {
        /// The asset identifier.
        asset: String,
        /// The rejected percentage.
        value: String,
    },

    /// Asset identifier is unusable.
    #[error("Invalid asset: {reason}")]
    InvalidAsset {
        /// The reason the asset was rejected.
        reason: String,
    },

    /// A taxonomy record could not be loaded.
    #[error("Taxonomy record at line {line}: {reason}")]
    TaxonomyLoad {
        /// 1-based line of the failing record in the source file.
        line: u64,
        /// The reason the record was rejected.
        reason: String,
    },

    /// The taxonomy source lacks a required column.
    #[error("Taxonomy source is missing required column '{column}'")]
    MissingColumn {
        /// The missing column header.
        column: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StrataError {
    /// Create an invalid allocation error.
    #[must_use]
    pub fn invalid_allocation(asset: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidAllocation {
            asset: asset.into(),
            value: value.to_string(),
        }
    }

    /// Create an invalid asset error.
    #[must_use]
    pub fn invalid_asset(reason: impl Into<String>) -> Self {
        Self::InvalidAsset {
            reason: reason.into(),
        }
    }

    /// Create a taxonomy load error.
    #[must_use]
    pub fn taxonomy_load(line: u64, reason: impl Into<String>) -> Self {
        Self::TaxonomyLoad {
            line,
            reason: reason.into(),
        }
    }

    /// Create a missing column error.
    #[must_use]
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }
}
