//! # Strata Portfolio
//!
//! Hierarchical classification rollups for portfolio allocations.
//!
//! Holdings are a flat mapping of asset name to percentage allocation. Each
//! asset is classified through an external five-level taxonomy
//! (Classification → Asset Class → Sub-Asset Class → Liquidity →
//! Instrument/Manager), and the allocations are rolled up at every level into
//! a single, deterministically ordered table suitable for sunburst charts and
//! category summaries.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: Aggregation borrows its inputs and returns fresh values
//! - **Total lookups**: Unknown assets fall back to `Alternative` / `Illiquid`
//! - **Exact arithmetic**: `Decimal` keeps parent = sum of children exact
//! - **Caller-owned state**: [`Holdings`] changes only through add/remove
//!
//! ## Quick Start
//!
//! ```rust
//! use strata_portfolio::prelude::*;
//!
//! let taxonomy = TaxonomyTable::from_entries([
//!     ("US Stock ETF", ClassificationEntry::new("Traditional", "Public", "Equity", "Highly Liquid", "US Stock ETF")),
//!     ("Private Equity Fund", ClassificationEntry::new("Alternative", "Private", "Equity", "Illiquid", "Private Equity Fund")),
//! ]);
//!
//! let mut holdings = Holdings::new();
//! holdings.add_asset("US Stock ETF", dec!(60)).unwrap();
//! holdings.add_asset("Private Equity Fund", dec!(40)).unwrap();
//!
//! let table = aggregate(&holdings, dec!(1000), &taxonomy);
//! assert_eq!(table.rows_at(TaxonomyLevel::Classification).count(), 2);
//!
//! let summary = summarize(&holdings, &taxonomy);
//! assert_eq!(summary.by_liquidity.get("Illiquid"), Some(dec!(40)));
//! ```
//!
//! ## Module Overview
//!
//! - [`classification`] - Taxonomy tables and the fallback-returning resolver
//! - [`rollup`] - Hierarchical table, flat summaries, sunburst nodes, CSV export
//! - [`types`] - Core types (taxonomy levels, entries, holdings, config)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod classification;
pub mod error;
pub mod rollup;
pub mod types;

// Re-export error types at crate root
pub use error::{StrataError, StrataResult};

// Re-export main types
pub use types::{
    AggregationConfig, AllocationCheck, ClassificationEntry, Holdings, LiquidityTier, TableView,
    TaxonomyLevel,
};

pub use classification::{resolve_classification, ClassificationSource, TaxonomyTable};

pub use rollup::{
    aggregate, aggregate_with_config, build_report, summarize, sunburst_nodes, to_csv_string,
    write_csv, write_summary_csv, AggregateRow, CategoryDistribution, ClassificationSummary,
    HierarchicalTable, RollupReport, SummaryDimension, SunburstNode, MAX_TOTAL_VALUE,
};

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use strata_portfolio::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{StrataError, StrataResult};

    // Taxonomy and holdings
    pub use crate::types::{
        AggregationConfig, AllocationCheck, ClassificationEntry, Holdings, LiquidityTier,
        TableView, TaxonomyLevel,
    };

    // Classification lookup
    pub use crate::classification::{resolve_classification, ClassificationSource, TaxonomyTable};

    // Rollups
    pub use crate::rollup::{
        aggregate, aggregate_with_config, build_report, summarize, sunburst_nodes, to_csv_string,
        write_csv, AggregateRow, CategoryDistribution, ClassificationSummary, HierarchicalTable,
        RollupReport, SummaryDimension, SunburstNode,
    };

    // Re-export commonly used types from dependencies
    pub use rust_decimal::Decimal;
    pub use rust_decimal_macros::dec;
}
