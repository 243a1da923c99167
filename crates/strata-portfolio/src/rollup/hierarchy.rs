//! Five-level hierarchical aggregation.
//!
//! Holdings are resolved to their classification and then grouped once per
//! taxonomy level, each level grouping by a longer prefix of
//! `[Classification, Asset Class, Sub-Asset Class, Liquidity, Instrument/Manager]`.
//! The level row sets are concatenated (level 1 first) and stably sorted by
//! the first four fields, with absent fields sorting before any value.
//!
//! The resulting table satisfies, for every row at levels 1-4:
//!
//! ```text
//! row.allocation_pct == sum(child.allocation_pct for child in children_of(row))
//! ```
//!
//! and for every row `allocation_value == allocation_pct / 100 * total_value`.

use crate::classification::ClassificationSource;
use crate::types::{AggregationConfig, ClassificationEntry, Holdings, TableView, TaxonomyLevel};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, warn};

// =============================================================================
// AGGREGATE ROW
// =============================================================================

/// Summed allocation for one distinct taxonomy prefix at one level.
///
/// Fields deeper than `level` are `None` ("not drilled into"), which is
/// distinct from a resolved empty string such as the fallback asset class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateRow {
    /// Level this row was grouped at.
    pub level: TaxonomyLevel,

    /// Top-level classification.
    #[serde(rename = "Classification")]
    pub classification: Option<String>,

    /// Asset class.
    #[serde(rename = "Asset Class")]
    pub asset_class: Option<String>,

    /// Sub-asset class.
    #[serde(rename = "Sub-Asset Class")]
    pub sub_asset_class: Option<String>,

    /// Liquidity label.
    #[serde(rename = "Liquidity")]
    pub liquidity: Option<String>,

    /// Instrument or manager.
    #[serde(rename = "Instrument/Manager")]
    pub instrument_manager: Option<String>,

    /// Summed allocation, in percent of the portfolio.
    #[serde(rename = "Allocation (%)")]
    pub allocation_pct: Decimal,

    /// Summed allocation in currency units.
    #[serde(rename = "Allocation ($)")]
    pub allocation_value: Decimal,
}

impl AggregateRow {
    fn from_key(level: TaxonomyLevel, key: &[&str], allocation_pct: Decimal, allocation_value: Decimal) -> Self {
        let part = |i: usize| key.get(i).map(|s| (*s).to_string());
        Self {
            level,
            classification: part(0),
            asset_class: part(1),
            sub_asset_class: part(2),
            liquidity: part(3),
            instrument_manager: part(4),
            allocation_pct,
            allocation_value,
        }
    }

    /// Returns the value of one taxonomy field, `None` if not populated at
    /// this row's level.
    #[must_use]
    pub fn field(&self, level: TaxonomyLevel) -> Option<&str> {
        match level {
            TaxonomyLevel::Classification => self.classification.as_deref(),
            TaxonomyLevel::AssetClass => self.asset_class.as_deref(),
            TaxonomyLevel::SubAssetClass => self.sub_asset_class.as_deref(),
            TaxonomyLevel::Liquidity => self.liquidity.as_deref(),
            TaxonomyLevel::InstrumentManager => self.instrument_manager.as_deref(),
        }
    }

    /// Returns the populated taxonomy values, broadest first.
    #[must_use]
    pub fn path(&self) -> Vec<&str> {
        TaxonomyLevel::ALL
            .iter()
            .map_while(|l| self.field(*l))
            .collect()
    }

    /// Returns the most specific populated value.
    #[must_use]
    pub fn label(&self) -> &str {
        self.field(self.level).unwrap_or_default()
    }

    /// Returns true for instrument-level rows.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.instrument_manager.is_some()
    }

    /// Returns true if `other` sits one level below this row under the same
    /// prefix.
    #[must_use]
    pub fn is_parent_of(&self, other: &AggregateRow) -> bool {
        self.level.child() == Some(other.level)
            && self
                .level
                .prefix()
                .iter()
                .all(|l| self.field(*l) == other.field(*l))
    }

    /// Canonical ordering: the first four taxonomy fields, absent first.
    fn sort_cmp(&self, other: &Self) -> Ordering {
        self.classification
            .cmp(&other.classification)
            .then_with(|| self.asset_class.cmp(&other.asset_class))
            .then_with(|| self.sub_asset_class.cmp(&other.sub_asset_class))
            .then_with(|| self.liquidity.cmp(&other.liquidity))
    }
}

// =============================================================================
// HIERARCHICAL TABLE
// =============================================================================

/// Union of aggregate rows across all five taxonomy levels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchicalTable {
    /// Rows in canonical order.
    pub rows: Vec<AggregateRow>,

    /// Portfolio value used to derive currency allocations.
    pub total_value: Decimal,
}

impl HierarchicalTable {
    /// Returns all rows in canonical order.
    #[must_use]
    pub fn rows(&self) -> &[AggregateRow] {
        &self.rows
    }

    /// Consumes the table, returning its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<AggregateRow> {
        self.rows
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates rows in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &AggregateRow> {
        self.rows.iter()
    }

    /// Iterates rows grouped at `level`, in canonical order.
    pub fn rows_at(&self, level: TaxonomyLevel) -> impl Iterator<Item = &AggregateRow> {
        self.rows.iter().filter(move |r| r.level == level)
    }

    /// Iterates instrument-level rows, in canonical order.
    pub fn leaf_rows(&self) -> impl Iterator<Item = &AggregateRow> {
        self.rows.iter().filter(|r| r.is_leaf())
    }

    /// Returns a table holding only instrument-level rows.
    #[must_use]
    pub fn leaves(&self) -> HierarchicalTable {
        HierarchicalTable {
            rows: self.leaf_rows().cloned().collect(),
            total_value: self.total_value,
        }
    }

    /// Returns the table restricted to `view`.
    #[must_use]
    pub fn view(self, view: TableView) -> HierarchicalTable {
        match view {
            TableView::Full => self,
            TableView::LeavesOnly => self.leaves(),
        }
    }

    /// Returns the rows directly beneath `row` (one level deeper, same prefix).
    #[must_use]
    pub fn children_of(&self, row: &AggregateRow) -> Vec<&AggregateRow> {
        self.rows.iter().filter(|r| row.is_parent_of(r)).collect()
    }

    /// Sum of top-level allocations, in percent.
    ///
    /// For a leaves-only table this sums the leaf rows instead.
    #[must_use]
    pub fn total_pct(&self) -> Decimal {
        let top: Vec<_> = self.rows_at(TaxonomyLevel::Classification).collect();
        if top.is_empty() {
            self.leaf_rows().map(|r| r.allocation_pct).sum()
        } else {
            top.iter().map(|r| r.allocation_pct).sum()
        }
    }

    /// Finds the row at `level` whose populated path equals `path`.
    #[must_use]
    pub fn find(&self, path: &[&str]) -> Option<&AggregateRow> {
        let level = TaxonomyLevel::from_depth(path.len())?;
        self.rows_at(level).find(|r| r.path() == path)
    }
}

// =============================================================================
// AGGREGATION
// =============================================================================

/// Largest total portfolio value that front-ends should accept.
///
/// With allocations summing to 100% every currency column stays far below
/// `Decimal::MAX` at this bound. Larger values still aggregate, but group
/// values that overflow saturate at `Decimal::MAX`.
pub const MAX_TOTAL_VALUE: Decimal = Decimal::from_parts(0xA764_0000, 0x0DE0_B6B3, 0, false, 0);

/// A holding joined with its resolved classification.
struct ExpandedRow {
    entry: ClassificationEntry,
    allocation_pct: Decimal,
}

/// Builds the hierarchical rollup table for `holdings`.
///
/// Each asset is resolved through `source` exactly once. Allocations that do
/// not sum to 100% are aggregated as given; use [`Holdings::check_total`] to
/// surface an advisory. A zero `total_value` yields zero currency columns.
///
/// Never panics: currency values that would overflow `Decimal` saturate at
/// `Decimal::MAX` (see [`MAX_TOTAL_VALUE`]).
///
/// # Examples
///
/// ```
/// use strata_portfolio::prelude::*;
///
/// let taxonomy = TaxonomyTable::from_entries([
///     ("US Stock ETF", ClassificationEntry::new("Traditional", "Public", "Equity", "Highly Liquid", "US Stock ETF")),
///     ("Private Equity Fund", ClassificationEntry::new("Alternative", "Private", "Equity", "Illiquid", "Private Equity Fund")),
/// ]);
/// let holdings = Holdings::from_pairs([
///     ("US Stock ETF", dec!(60)),
///     ("Private Equity Fund", dec!(40)),
/// ]).unwrap();
///
/// let table = aggregate(&holdings, dec!(1000), &taxonomy);
/// let traditional = table.find(&["Traditional"]).unwrap();
/// assert_eq!(traditional.allocation_pct, dec!(60));
/// assert_eq!(traditional.allocation_value, dec!(600));
/// assert_eq!(table.leaf_rows().count(), 2);
/// ```
#[must_use]
pub fn aggregate<S>(holdings: &Holdings, total_value: Decimal, source: &S) -> HierarchicalTable
where
    S: ClassificationSource + ?Sized,
{
    if holdings.is_empty() {
        return HierarchicalTable {
            rows: Vec::new(),
            total_value,
        };
    }

    let expanded: Vec<ExpandedRow> = holdings
        .iter()
        .map(|(asset, pct)| ExpandedRow {
            entry: source.resolve(asset),
            allocation_pct: pct,
        })
        .collect();

    let mut rows = Vec::new();
    for level in TaxonomyLevel::ALL {
        rows.extend(group_level(&expanded, level, total_value));
    }

    // Stable: ties keep level order, so parents precede their children.
    rows.sort_by(AggregateRow::sort_cmp);

    debug!(
        holdings = holdings.len(),
        rows = rows.len(),
        total_value = %total_value,
        "built hierarchical rollup"
    );

    HierarchicalTable { rows, total_value }
}

/// Builds the rollup table and restricts it to the configured view.
#[must_use]
pub fn aggregate_with_config<S>(
    holdings: &Holdings,
    total_value: Decimal,
    source: &S,
    config: &AggregationConfig,
) -> HierarchicalTable
where
    S: ClassificationSource + ?Sized,
{
    aggregate(holdings, total_value, source).view(config.view)
}

/// Currency value of `pct` percent of `total_value`, saturating at
/// `Decimal::MAX` instead of overflowing.
fn allocation_value(pct: Decimal, total_value: Decimal) -> Decimal {
    (pct / Decimal::ONE_HUNDRED)
        .checked_mul(total_value)
        .unwrap_or_else(|| {
            warn!(pct = %pct, total_value = %total_value, "allocation value overflows; saturating");
            Decimal::MAX
        })
}

/// Groups expanded rows by the prefix key of `level`, summing percentages.
///
/// Each group's currency value is derived once from its summed percentage.
/// Groups are emitted in key order.
fn group_level(expanded: &[ExpandedRow], level: TaxonomyLevel, total_value: Decimal) -> Vec<AggregateRow> {
    let mut groups: BTreeMap<Vec<&str>, Decimal> = BTreeMap::new();
    for row in expanded {
        let sum = groups.entry(row.entry.prefix(level)).or_insert(Decimal::ZERO);
        *sum = sum.saturating_add(row.allocation_pct);
    }

    groups
        .into_iter()
        .map(|(key, pct)| AggregateRow::from_key(level, &key, pct, allocation_value(pct, total_value)))
        .collect()
}
