//! Asset classification lookup.
//!
//! - [`ClassificationSource`]: Exact-key lookup with a total `resolve`
//! - [`TaxonomyTable`]: Read-only table loaded from CSV or JSON
//!
//! Unknown assets are never an error: they resolve to the conservative
//! `Alternative` / `Illiquid` bucket with the asset name as the leaf.

mod source;
mod table;

pub use source::{resolve_classification, ClassificationSource};
pub use table::{TaxonomyTable, ASSET_COLUMN};
