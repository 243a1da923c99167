//! Allocation rollups.
//!
//! - **Hierarchy**: Five-level table of summed allocations (sunburst data)
//! - **Summary**: Flat distributions by classification, access and liquidity
//! - **Sunburst**: id/parent nodes derived from the hierarchy
//! - **Export**: CSV serialization with a fixed column order
//! - **Report**: All of the above plus the 100% allocation advisory
//!
//! All functions are pure - they borrow holdings and a classification source
//! and return fresh values without modifying state.
//!
//! # Example
//!
//! ```rust,ignore
//! use strata_portfolio::prelude::*;
//!
//! let taxonomy = TaxonomyTable::from_csv_path("taxonomy.csv")?;
//! let table = aggregate(&holdings, dec!(1_000_000), &taxonomy);
//! for row in table.rows_at(TaxonomyLevel::Classification) {
//!     println!("{}: {}%", row.label(), row.allocation_pct);
//! }
//! ```

mod export;
mod hierarchy;
mod report;
mod summary;
mod sunburst;

pub use export::*;
pub use hierarchy::*;
pub use report::*;
pub use summary::*;
pub use sunburst::*;
