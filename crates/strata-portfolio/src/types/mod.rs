//! Domain types for classification rollups.
//!
//! - [`ClassificationEntry`]: The five-field classification of one asset
//! - [`TaxonomyLevel`]: The five taxonomy levels in drill-down order
//! - [`LiquidityTier`]: Ordinal liquidity view
//! - [`Holdings`]: Caller-owned asset to percentage mapping
//! - [`AggregationConfig`]: Configuration for rollup computation

mod config;
mod holdings;
mod taxonomy;

pub use config::{AggregationConfig, TableView};
pub use holdings::{AllocationCheck, Holdings, DEFAULT_TOTAL_TOLERANCE};
pub use taxonomy::{
    ClassificationEntry, LiquidityTier, TaxonomyLevel, FALLBACK_ACCESS, FALLBACK_CLASSIFICATION,
    FALLBACK_LIQUIDITY,
};
