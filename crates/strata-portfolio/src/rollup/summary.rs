//! Flat single-level category summaries.
//!
//! Three independent distributions of allocation percentage: by top-level
//! classification, by access (public vs private markets), and by liquidity.
//! They are computed straight from the holdings and are not linked to the
//! hierarchical table.

use crate::classification::ClassificationSource;
use crate::types::{
    Holdings, LiquidityTier, FALLBACK_ACCESS, FALLBACK_CLASSIFICATION, FALLBACK_LIQUIDITY,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Dimension a [`CategoryDistribution`] groups by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SummaryDimension {
    /// Top-level classification (e.g. Traditional vs Alternative).
    Classification,
    /// Access dimension, taken from the asset class (e.g. Public vs Private).
    Access,
    /// Liquidity label.
    Liquidity,
}

impl SummaryDimension {
    /// All dimensions in presentation order.
    pub const ALL: [SummaryDimension; 3] = [
        SummaryDimension::Classification,
        SummaryDimension::Access,
        SummaryDimension::Liquidity,
    ];

    /// Returns a human-readable name for the dimension.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Classification => "Classification",
            Self::Access => "Access",
            Self::Liquidity => "Liquidity",
        }
    }
}

impl std::fmt::Display for SummaryDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Summary attributes of one asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SummaryKey {
    /// Top-level classification.
    pub classification: String,
    /// Access dimension.
    pub access: String,
    /// Liquidity label.
    pub liquidity: String,
}

impl SummaryKey {
    /// Resolves the summary attributes of `asset`.
    ///
    /// Unknown assets map to `("Alternative", "Private", "Illiquid")`.
    #[must_use]
    pub fn resolve<S>(asset: &str, source: &S) -> Self
    where
        S: ClassificationSource + ?Sized,
    {
        match source.lookup(asset) {
            Some(entry) => Self {
                classification: entry.classification.clone(),
                access: entry.asset_class.clone(),
                liquidity: entry.liquidity.clone(),
            },
            None => Self {
                classification: FALLBACK_CLASSIFICATION.to_string(),
                access: FALLBACK_ACCESS.to_string(),
                liquidity: FALLBACK_LIQUIDITY.to_string(),
            },
        }
    }

    /// Returns the attribute for one dimension.
    #[must_use]
    pub fn get(&self, dimension: SummaryDimension) -> &str {
        match dimension {
            SummaryDimension::Classification => &self.classification,
            SummaryDimension::Access => &self.access,
            SummaryDimension::Liquidity => &self.liquidity,
        }
    }
}

/// Allocation percentage summed per category along one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDistribution {
    /// Dimension the categories belong to.
    pub dimension: SummaryDimension,

    /// Summed allocation (percent) by category, in key order.
    pub by_category: BTreeMap<String, Decimal>,
}

impl CategoryDistribution {
    /// Creates an empty distribution.
    #[must_use]
    pub fn new(dimension: SummaryDimension) -> Self {
        Self {
            dimension,
            by_category: BTreeMap::new(),
        }
    }

    fn add(&mut self, category: &str, pct: Decimal) {
        *self
            .by_category
            .entry(category.to_string())
            .or_insert(Decimal::ZERO) += pct;
    }

    /// Returns the allocation of one category.
    #[must_use]
    pub fn get(&self, category: &str) -> Option<Decimal> {
        self.by_category.get(category).copied()
    }

    /// Returns the number of distinct categories.
    #[must_use]
    pub fn category_count(&self) -> usize {
        self.by_category.len()
    }

    /// Returns true if no categories were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }

    /// Sum over all categories.
    #[must_use]
    pub fn total_pct(&self) -> Decimal {
        self.by_category.values().copied().sum()
    }

    /// Returns categories sorted by key alphabetically.
    #[must_use]
    pub fn sorted_by_key(&self) -> Vec<(&str, Decimal)> {
        self.by_category
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect()
    }

    /// Returns categories sorted by allocation descending, ties by key.
    #[must_use]
    pub fn sorted_by_weight(&self) -> Vec<(&str, Decimal)> {
        let mut result = self.sorted_by_key();
        result.sort_by(|a, b| b.1.cmp(&a.1));
        result
    }

    /// Returns categories ordered from most to least liquid.
    ///
    /// Meaningful for the liquidity dimension; labels outside the known
    /// tiers come last, alphabetically.
    #[must_use]
    pub fn sorted_by_liquidity(&self) -> Vec<(&str, Decimal)> {
        let mut result = self.sorted_by_key();
        result.sort_by(|a, b| LiquidityTier::compare_labels(a.0, b.0));
        result
    }
}

/// The three flat category summaries of a portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationSummary {
    /// Allocation by top-level classification.
    pub by_classification: CategoryDistribution,

    /// Allocation by access dimension.
    pub by_access: CategoryDistribution,

    /// Allocation by liquidity.
    pub by_liquidity: CategoryDistribution,
}

impl Default for ClassificationSummary {
    fn default() -> Self {
        Self {
            by_classification: CategoryDistribution::new(SummaryDimension::Classification),
            by_access: CategoryDistribution::new(SummaryDimension::Access),
            by_liquidity: CategoryDistribution::new(SummaryDimension::Liquidity),
        }
    }
}

impl ClassificationSummary {
    /// Builds summaries from already-resolved keys and allocations.
    #[must_use]
    pub fn from_keys<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = (&'a SummaryKey, Decimal)>,
    {
        let mut summary = Self::default();
        for (key, pct) in items {
            summary.by_classification.add(&key.classification, pct);
            summary.by_access.add(&key.access, pct);
            summary.by_liquidity.add(&key.liquidity, pct);
        }
        summary
    }

    /// Returns the distribution for one dimension.
    #[must_use]
    pub fn dimension(&self, dimension: SummaryDimension) -> &CategoryDistribution {
        match dimension {
            SummaryDimension::Classification => &self.by_classification,
            SummaryDimension::Access => &self.by_access,
            SummaryDimension::Liquidity => &self.by_liquidity,
        }
    }

    /// Iterates the three distributions in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = &CategoryDistribution> {
        SummaryDimension::ALL.into_iter().map(|d| self.dimension(d))
    }
}

/// Builds the three flat summaries for `holdings`.
///
/// # Examples
///
/// ```
/// use strata_portfolio::prelude::*;
///
/// let taxonomy = TaxonomyTable::from_entries([
///     ("US Stock ETF", ClassificationEntry::new("Traditional", "Public", "Equity", "Highly Liquid", "US Stock ETF")),
/// ]);
/// let holdings = Holdings::from_pairs([("US Stock ETF", dec!(70)), ("Timberland", dec!(30))]).unwrap();
///
/// let summary = summarize(&holdings, &taxonomy);
/// assert_eq!(summary.by_access.get("Public"), Some(dec!(70)));
/// assert_eq!(summary.by_access.get("Private"), Some(dec!(30)));
/// assert_eq!(summary.by_liquidity.get("Illiquid"), Some(dec!(30)));
/// ```
#[must_use]
pub fn summarize<S>(holdings: &Holdings, source: &S) -> ClassificationSummary
where
    S: ClassificationSource + ?Sized,
{
    let keys: Vec<(SummaryKey, Decimal)> = holdings
        .iter()
        .map(|(asset, pct)| (SummaryKey::resolve(asset, source), pct))
        .collect();
    ClassificationSummary::from_keys(keys.iter().map(|(k, p)| (k, *p)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::TaxonomyTable;
    use crate::types::ClassificationEntry;
    use rust_decimal_macros::dec;

    fn taxonomy() -> TaxonomyTable {
        TaxonomyTable::from_entries([
            (
                "US Stock ETF",
                ClassificationEntry::new("Traditional", "Public", "Equity", "Highly Liquid", "US Stock ETF"),
            ),
            (
                "Interval Fund",
                ClassificationEntry::new("Alternative", "Public", "Credit", "Moderately Liquid", "Interval Fund"),
            ),
            (
                "Private Equity Fund",
                ClassificationEntry::new("Alternative", "Private", "Equity", "Illiquid", "Private Equity Fund"),
            ),
        ])
    }

    fn holdings() -> Holdings {
        Holdings::from_pairs([
            ("US Stock ETF", dec!(50)),
            ("Interval Fund", dec!(20)),
            ("Private Equity Fund", dec!(20)),
            ("Farmland", dec!(10)),
        ])
        .unwrap()
    }

    #[test]
    fn test_summarize() {
        let summary = summarize(&holdings(), &taxonomy());

        assert_eq!(summary.by_classification.get("Traditional"), Some(dec!(50)));
        assert_eq!(summary.by_classification.get("Alternative"), Some(dec!(50)));

        assert_eq!(summary.by_access.get("Public"), Some(dec!(70)));
        assert_eq!(summary.by_access.get("Private"), Some(dec!(30)));

        assert_eq!(summary.by_liquidity.get("Highly Liquid"), Some(dec!(50)));
        assert_eq!(summary.by_liquidity.get("Moderately Liquid"), Some(dec!(20)));
        assert_eq!(summary.by_liquidity.get("Illiquid"), Some(dec!(30)));

        for dist in summary.iter() {
            assert_eq!(dist.total_pct(), dec!(100));
        }
    }

    #[test]
    fn test_unknown_asset_uses_private_access() {
        let key = SummaryKey::resolve("Farmland", &taxonomy());
        assert_eq!(key.classification, "Alternative");
        assert_eq!(key.access, "Private");
        assert_eq!(key.liquidity, "Illiquid");
        assert_eq!(key.get(SummaryDimension::Access), "Private");
    }

    #[test]
    fn test_empty_holdings() {
        let summary = summarize(&Holdings::new(), &taxonomy());
        assert!(summary.by_classification.is_empty());
        assert!(summary.by_access.is_empty());
        assert!(summary.by_liquidity.is_empty());
        assert_eq!(summary, ClassificationSummary::default());
    }

    #[test]
    fn test_orderings() {
        let summary = summarize(&holdings(), &taxonomy());

        let by_key: Vec<_> = summary.by_liquidity.sorted_by_key().into_iter().map(|(k, _)| k).collect();
        assert_eq!(by_key, vec!["Highly Liquid", "Illiquid", "Moderately Liquid"]);

        let by_tier: Vec<_> = summary
            .by_liquidity
            .sorted_by_liquidity()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(by_tier, vec!["Highly Liquid", "Moderately Liquid", "Illiquid"]);

        let by_weight = summary.by_access.sorted_by_weight();
        assert_eq!(by_weight[0], ("Public", dec!(70)));
        assert_eq!(by_weight[1], ("Private", dec!(30)));
    }

    #[test]
    fn test_weight_ties_keep_key_order() {
        let summary = summarize(&holdings(), &taxonomy());
        let by_weight: Vec<_> = summary
            .by_classification
            .sorted_by_weight()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(by_weight, vec!["Alternative", "Traditional"]);
    }

    #[test]
    fn test_dimension_lookup() {
        let summary = summarize(&holdings(), &taxonomy());
        assert_eq!(summary.dimension(SummaryDimension::Access).dimension, SummaryDimension::Access);
        assert_eq!(summary.iter().count(), 3);
        assert_eq!(SummaryDimension::Liquidity.to_string(), "Liquidity");
    }
}
