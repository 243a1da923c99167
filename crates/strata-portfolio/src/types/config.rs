//! Configuration for rollup computation.

use super::holdings::DEFAULT_TOTAL_TOLERANCE;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which rows of the hierarchical table to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableView {
    /// Every level, from top-level classification down to instruments.
    #[default]
    Full,

    /// Only leaf rows (instrument/manager populated).
    LeavesOnly,
}

impl TableView {
    /// Returns a human-readable name for the view.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Full => "Full Hierarchy",
            Self::LeavesOnly => "Leaves Only",
        }
    }
}

impl std::fmt::Display for TableView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Configuration for rollup computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Rows to emit from the hierarchical table.
    #[serde(default)]
    pub view: TableView,

    /// Tolerance in percentage points for the 100% allocation check.
    #[serde(default = "default_tolerance")]
    pub total_tolerance: Decimal,
}

fn default_tolerance() -> Decimal {
    DEFAULT_TOTAL_TOLERANCE
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            view: TableView::Full,
            total_tolerance: DEFAULT_TOTAL_TOLERANCE,
        }
    }
}

impl AggregationConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that emits leaf rows only.
    #[must_use]
    pub fn leaves_only() -> Self {
        Self {
            view: TableView::LeavesOnly,
            ..Self::default()
        }
    }

    /// Sets the table view.
    #[must_use]
    pub fn with_view(mut self, view: TableView) -> Self {
        self.view = view;
        self
    }

    /// Sets the allocation total tolerance.
    #[must_use]
    pub fn with_total_tolerance(mut self, tolerance: Decimal) -> Self {
        self.total_tolerance = tolerance.abs();
        self
    }
}
