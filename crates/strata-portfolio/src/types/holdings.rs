//! Caller-owned holdings container.

use crate::error::{StrataError, StrataResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default tolerance (in percentage points) when checking that allocations
/// sum to 100%.
pub const DEFAULT_TOTAL_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Portfolio holdings: asset identifier to allocation percentage (0-100).
///
/// Asset names are unique by construction. The container is owned by the
/// caller and only changes through [`Holdings::add_asset`] and
/// [`Holdings::remove_asset`]; aggregation borrows it as a snapshot.
///
/// Serializes as a plain JSON object (`{"VTI": 60.0, ...}`).
///
/// # Examples
///
/// ```
/// use strata_portfolio::types::Holdings;
/// use rust_decimal_macros::dec;
///
/// let mut holdings = Holdings::new();
/// holdings.add_asset("US Stock ETF", dec!(60)).unwrap();
/// holdings.add_asset("Private Equity Fund", dec!(40)).unwrap();
///
/// assert_eq!(holdings.total_pct(), dec!(100));
/// assert!(holdings.check_total(dec!(0.01)).within_tolerance);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Holdings {
    allocations: BTreeMap<String, Decimal>,
}

impl Holdings {
    /// Creates an empty holdings set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds holdings from `(asset, pct)` pairs, validating each one.
    ///
    /// # Errors
    ///
    /// Returns the first validation error from [`Holdings::add_asset`].
    pub fn from_pairs<I, S>(pairs: I) -> StrataResult<Self>
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: Into<String>,
    {
        let mut holdings = Self::new();
        for (asset, pct) in pairs {
            holdings.add_asset(asset, pct)?;
        }
        Ok(holdings)
    }

    /// Adds an asset, or replaces the allocation of one already held.
    ///
    /// Returns the previous allocation when the asset was already present.
    ///
    /// # Errors
    ///
    /// Returns an error if the asset name is blank or the percentage is
    /// outside `[0, 100]`.
    pub fn add_asset(&mut self, asset: impl Into<String>, pct: Decimal) -> StrataResult<Option<Decimal>> {
        let asset = asset.into();
        if asset.trim().is_empty() {
            return Err(StrataError::invalid_asset("asset name is empty"));
        }
        if pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED {
            return Err(StrataError::invalid_allocation(asset, pct));
        }
        Ok(self.allocations.insert(asset, pct))
    }

    /// Removes an asset, returning its allocation if it was held.
    pub fn remove_asset(&mut self, asset: &str) -> Option<Decimal> {
        self.allocations.remove(asset)
    }

    /// Returns the allocation of an asset.
    #[must_use]
    pub fn get(&self, asset: &str) -> Option<Decimal> {
        self.allocations.get(asset).copied()
    }

    /// Returns true if the asset is held.
    #[must_use]
    pub fn contains(&self, asset: &str) -> bool {
        self.allocations.contains_key(asset)
    }

    /// Returns the number of holdings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.allocations.len()
    }

    /// Returns true if there are no holdings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }

    /// Iterates `(asset, pct)` pairs in asset-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.allocations.iter().map(|(a, p)| (a.as_str(), *p))
    }

    /// Returns held asset names in order.
    #[must_use]
    pub fn assets(&self) -> Vec<&str> {
        self.allocations.keys().map(String::as_str).collect()
    }

    /// Sum of all allocations, in percent.
    #[must_use]
    pub fn total_pct(&self) -> Decimal {
        self.allocations.values().copied().sum()
    }

    /// Checks whether allocations sum to 100% within `tolerance` percentage
    /// points.
    ///
    /// This is advisory: aggregation runs regardless of the outcome.
    #[must_use]
    pub fn check_total(&self, tolerance: Decimal) -> AllocationCheck {
        AllocationCheck::new(self.total_pct(), tolerance)
    }

    /// Returns the assets from `universe` that are not held yet.
    ///
    /// Used by selection front-ends to offer only addable assets.
    #[must_use]
    pub fn available_assets<'a>(&self, universe: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
        universe.into_iter().filter(|a| !self.contains(a)).collect()
    }
}

/// Outcome of checking that holdings sum to 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationCheck {
    /// Sum of all allocations, in percent.
    pub total_pct: Decimal,

    /// `total_pct - 100`.
    pub deviation: Decimal,

    /// True if `|deviation| <= tolerance`.
    pub within_tolerance: bool,
}

impl AllocationCheck {
    /// Evaluates a total against 100% with the given tolerance.
    #[must_use]
    pub fn new(total_pct: Decimal, tolerance: Decimal) -> Self {
        let deviation = total_pct - Decimal::ONE_HUNDRED;
        Self {
            total_pct,
            deviation,
            within_tolerance: deviation.abs() <= tolerance.abs(),
        }
    }

    /// Human-readable advisory for totals outside tolerance.
    #[must_use]
    pub fn warning(&self) -> Option<String> {
        if self.within_tolerance {
            None
        } else {
            Some(format!(
                "Total allocation is {}%, not 100% (off by {})",
                self.total_pct.normalize(),
                self.deviation.normalize()
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_tolerance() {
        assert_eq!(DEFAULT_TOTAL_TOLERANCE, dec!(0.01));
    }

    #[test]
    fn test_add_and_replace() {
        let mut holdings = Holdings::new();
        assert_eq!(holdings.add_asset("Gold", dec!(10)).unwrap(), None);
        assert_eq!(holdings.add_asset("Gold", dec!(12.5)).unwrap(), Some(dec!(10)));
        assert_eq!(holdings.len(), 1);
        assert_eq!(holdings.get("Gold"), Some(dec!(12.5)));
    }

    #[test]
    fn test_add_rejects_out_of_range() {
        let mut holdings = Holdings::new();
        assert!(matches!(
            holdings.add_asset("Gold", dec!(-1)),
            Err(StrataError::InvalidAllocation { .. })
        ));
        assert!(matches!(
            holdings.add_asset("Gold", dec!(100.5)),
            Err(StrataError::InvalidAllocation { .. })
        ));
        assert!(holdings.add_asset("Gold", dec!(0)).is_ok());
        assert!(holdings.add_asset("Cash", dec!(100)).is_ok());
    }

    #[test]
    fn test_add_rejects_blank_name() {
        let mut holdings = Holdings::new();
        assert!(matches!(
            holdings.add_asset("  ", dec!(5)),
            Err(StrataError::InvalidAsset { .. })
        ));
        assert!(holdings.is_empty());
    }

    #[test]
    fn test_remove() {
        let mut holdings = Holdings::from_pairs([("A", dec!(30)), ("B", dec!(70))]).unwrap();
        assert_eq!(holdings.remove_asset("A"), Some(dec!(30)));
        assert_eq!(holdings.remove_asset("A"), None);
        assert_eq!(holdings.assets(), vec!["B"]);
    }

    #[test]
    fn test_check_total() {
        let holdings = Holdings::from_pairs([("A", dec!(33.33)), ("B", dec!(33.33)), ("C", dec!(33.33))]).unwrap();
        let check = holdings.check_total(DEFAULT_TOTAL_TOLERANCE);
        assert_eq!(check.total_pct, dec!(99.99));
        assert_eq!(check.deviation, dec!(-0.01));
        assert!(check.within_tolerance);
        assert!(check.warning().is_none());

        let holdings = Holdings::from_pairs([("A", dec!(50)), ("B", dec!(40))]).unwrap();
        let check = holdings.check_total(DEFAULT_TOTAL_TOLERANCE);
        assert!(!check.within_tolerance);
        assert!(check.warning().unwrap().contains("90%"));
    }

    #[test]
    fn test_available_assets() {
        let holdings = Holdings::from_pairs([("B", dec!(100))]).unwrap();
        let universe = ["A", "B", "C"];
        assert_eq!(holdings.available_assets(universe), vec!["A", "C"]);
    }

    #[test]
    fn test_serde_transparent() {
        let holdings = Holdings::from_pairs([("VTI", dec!(60)), ("Gold", dec!(40))]).unwrap();
        let json = serde_json::to_string(&holdings).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.contains("\"VTI\""));

        let parsed: Holdings = serde_json::from_str(r#"{"VTI": 60.5, "Gold": 39.5}"#).unwrap();
        assert_eq!(parsed.get("VTI"), Some(dec!(60.5)));
        assert_eq!(parsed.total_pct(), dec!(100));
    }
}
