//! Five-level allocation taxonomy.
//!
//! Every asset is described by a fixed 5-tuple, ordered from the broadest
//! field to the most specific:
//!
//! ```text
//! Classification -> Asset Class -> Sub-Asset Class -> Liquidity -> Instrument/Manager
//! ```
//!
//! - [`TaxonomyLevel`]: One of the five fields, in drill-down order
//! - [`ClassificationEntry`]: The resolved 5-tuple for one asset
//! - [`LiquidityTier`]: Ordinal view over liquidity labels

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Top-level classification assigned to assets missing from the taxonomy.
pub const FALLBACK_CLASSIFICATION: &str = "Alternative";

/// Access dimension assigned to assets missing from the taxonomy.
pub const FALLBACK_ACCESS: &str = "Private";

/// Liquidity assigned to assets missing from the taxonomy.
pub const FALLBACK_LIQUIDITY: &str = "Illiquid";

// =============================================================================
// TAXONOMY LEVEL
// =============================================================================

static LEVELS: [TaxonomyLevel; 5] = TaxonomyLevel::ALL;

/// One level of the allocation taxonomy.
///
/// Levels are ordered by depth: grouping by a level groups by every field up
/// to and including it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaxonomyLevel {
    /// Top-level bucket (e.g. "Traditional", "Alternative").
    Classification,
    /// Asset class (e.g. "Public", "Private").
    AssetClass,
    /// Sub-asset class (e.g. "Equity", "Credit").
    SubAssetClass,
    /// Liquidity tier label.
    Liquidity,
    /// Leaf identifier: instrument or manager name.
    InstrumentManager,
}

impl TaxonomyLevel {
    /// All levels, broadest first.
    pub const ALL: [TaxonomyLevel; 5] = [
        TaxonomyLevel::Classification,
        TaxonomyLevel::AssetClass,
        TaxonomyLevel::SubAssetClass,
        TaxonomyLevel::Liquidity,
        TaxonomyLevel::InstrumentManager,
    ];

    /// Returns the 1-based depth of this level (1 = Classification, 5 = leaf).
    #[must_use]
    pub fn depth(&self) -> usize {
        *self as usize + 1
    }

    /// Returns the level at a 1-based depth.
    #[must_use]
    pub fn from_depth(depth: usize) -> Option<Self> {
        depth.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// Returns the grouping key for this level: every field up to and
    /// including this one.
    #[must_use]
    pub fn prefix(&self) -> &'static [TaxonomyLevel] {
        &LEVELS[..self.depth()]
    }

    /// Returns the next, more specific level.
    #[must_use]
    pub fn child(&self) -> Option<Self> {
        Self::from_depth(self.depth() + 1)
    }

    /// Returns the enclosing, broader level.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        Self::from_depth(self.depth() - 1)
    }

    /// Returns true for the most specific level.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        *self == TaxonomyLevel::InstrumentManager
    }

    /// Returns the column header used in tables and CSV exports.
    #[must_use]
    pub fn column_name(&self) -> &'static str {
        match self {
            Self::Classification => "Classification",
            Self::AssetClass => "Asset Class",
            Self::SubAssetClass => "Sub-Asset Class",
            Self::Liquidity => "Liquidity",
            Self::InstrumentManager => "Instrument/Manager",
        }
    }
}

impl std::fmt::Display for TaxonomyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

// =============================================================================
// CLASSIFICATION ENTRY
// =============================================================================

/// Classification of a single asset across all five taxonomy levels.
///
/// Serialized field names match the taxonomy source column headers.
///
/// # Examples
///
/// ```
/// use strata_portfolio::types::{ClassificationEntry, TaxonomyLevel};
///
/// let entry = ClassificationEntry::new("Traditional", "Public", "Equity", "Highly Liquid", "VTI");
/// assert_eq!(entry.field(TaxonomyLevel::AssetClass), "Public");
///
/// let unknown = ClassificationEntry::fallback("Farmland LP");
/// assert_eq!(unknown.classification, "Alternative");
/// assert_eq!(unknown.instrument_manager, "Farmland LP");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassificationEntry {
    /// Top-level classification.
    #[serde(rename = "Classification")]
    pub classification: String,

    /// Asset class (the access dimension: public vs private markets).
    #[serde(rename = "Asset Class")]
    pub asset_class: String,

    /// Sub-asset class.
    #[serde(rename = "Sub-Asset Class")]
    pub sub_asset_class: String,

    /// Liquidity tier label.
    #[serde(rename = "Liquidity")]
    pub liquidity: String,

    /// Instrument or manager name.
    #[serde(rename = "Instrument/Manager")]
    pub instrument_manager: String,
}

impl ClassificationEntry {
    /// Creates an entry from its five fields.
    #[must_use]
    pub fn new(
        classification: impl Into<String>,
        asset_class: impl Into<String>,
        sub_asset_class: impl Into<String>,
        liquidity: impl Into<String>,
        instrument_manager: impl Into<String>,
    ) -> Self {
        Self {
            classification: classification.into(),
            asset_class: asset_class.into(),
            sub_asset_class: sub_asset_class.into(),
            liquidity: liquidity.into(),
            instrument_manager: instrument_manager.into(),
        }
    }

    /// Classification for an asset missing from the taxonomy.
    ///
    /// Unknown assets land in the most conservative bucket: alternative and
    /// illiquid, with empty asset and sub-asset classes. The leaf is the asset
    /// identifier itself.
    #[must_use]
    pub fn fallback(asset: &str) -> Self {
        Self::new(FALLBACK_CLASSIFICATION, "", "", FALLBACK_LIQUIDITY, asset)
    }

    /// Returns the value of one taxonomy field.
    #[must_use]
    pub fn field(&self, level: TaxonomyLevel) -> &str {
        match level {
            TaxonomyLevel::Classification => &self.classification,
            TaxonomyLevel::AssetClass => &self.asset_class,
            TaxonomyLevel::SubAssetClass => &self.sub_asset_class,
            TaxonomyLevel::Liquidity => &self.liquidity,
            TaxonomyLevel::InstrumentManager => &self.instrument_manager,
        }
    }

    /// Returns the values of every field up to and including `level`.
    #[must_use]
    pub fn prefix(&self, level: TaxonomyLevel) -> Vec<&str> {
        level.prefix().iter().map(|l| self.field(*l)).collect()
    }

    /// Returns the liquidity tier parsed from the liquidity label.
    #[must_use]
    pub fn liquidity_tier(&self) -> LiquidityTier {
        LiquidityTier::from_label(&self.liquidity)
    }
}

// =============================================================================
// LIQUIDITY TIER
// =============================================================================

/// Ordinal liquidity tier.
///
/// Ordered from most to least liquid; labels outside the known set rank last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LiquidityTier {
    /// Tradable daily at low cost.
    HighlyLiquid,
    /// Redeemable on a periodic schedule.
    ModeratelyLiquid,
    /// Locked up or without a secondary market.
    Illiquid,
    /// Any label not recognised above.
    Other,
}

impl LiquidityTier {
    /// Parses a liquidity label (case-insensitive, surrounding whitespace ignored).
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "highly liquid" => Self::HighlyLiquid,
            "moderately liquid" => Self::ModeratelyLiquid,
            "illiquid" => Self::Illiquid,
            _ => Self::Other,
        }
    }

    /// Returns the canonical label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::HighlyLiquid => "Highly Liquid",
            Self::ModeratelyLiquid => "Moderately Liquid",
            Self::Illiquid => "Illiquid",
            Self::Other => "Other",
        }
    }

    /// Compares two liquidity labels by tier, then by label text.
    #[must_use]
    pub fn compare_labels(a: &str, b: &str) -> Ordering {
        Self::from_label(a)
            .cmp(&Self::from_label(b))
            .then_with(|| a.cmp(b))
    }
}

impl std::fmt::Display for LiquidityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
