//! Combined rollup output for presentation layers.

use super::hierarchy::{aggregate_with_config, HierarchicalTable};
use super::summary::{summarize, ClassificationSummary};
use crate::classification::ClassificationSource;
use crate::types::{AggregationConfig, AllocationCheck, Holdings};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Everything a reporting front-end needs for one holdings snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupReport {
    /// Hierarchical table in the configured view.
    pub table: HierarchicalTable,

    /// Flat category summaries.
    pub summary: ClassificationSummary,

    /// Advisory check that allocations sum to 100%.
    pub allocation_check: AllocationCheck,

    /// Assets that were not in the taxonomy and used the fallback.
    pub unclassified: Vec<String>,
}

impl RollupReport {
    /// Returns the advisory message when allocations are off 100%.
    #[must_use]
    pub fn warning(&self) -> Option<String> {
        self.allocation_check.warning()
    }
}

/// Builds the table, summaries and allocation check in one pass over the
/// inputs.
///
/// An allocation total outside tolerance is logged at `warn` and reported in
/// [`RollupReport::allocation_check`]; it never prevents aggregation.
#[must_use]
pub fn build_report<S>(
    holdings: &Holdings,
    total_value: Decimal,
    source: &S,
    config: &AggregationConfig,
) -> RollupReport
where
    S: ClassificationSource + ?Sized,
{
    let allocation_check = holdings.check_total(config.total_tolerance);
    if !allocation_check.within_tolerance {
        warn!(
            total_pct = %allocation_check.total_pct,
            deviation = %allocation_check.deviation,
            "holdings do not sum to 100%"
        );
    }

    let unclassified = holdings
        .assets()
        .into_iter()
        .filter(|a| !source.is_classified(a))
        .map(str::to_string)
        .collect();

    RollupReport {
        table: aggregate_with_config(holdings, total_value, source, config),
        summary: summarize(holdings, source),
        allocation_check,
        unclassified,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::TaxonomyTable;
    use crate::types::{ClassificationEntry, TableView};
    use rust_decimal_macros::dec;

    fn taxonomy() -> TaxonomyTable {
        TaxonomyTable::from_entries([(
            "US Stock ETF",
            ClassificationEntry::new("Traditional", "Public", "Equity", "Highly Liquid", "US Stock ETF"),
        )])
    }

    #[test]
    fn test_report_balanced() {
        let holdings = Holdings::from_pairs([("US Stock ETF", dec!(80)), ("Art", dec!(20))]).unwrap();
        let report = build_report(&holdings, dec!(10000), &taxonomy(), &AggregationConfig::default());

        assert!(report.allocation_check.within_tolerance);
        assert!(report.warning().is_none());
        assert_eq!(report.unclassified, vec!["Art".to_string()]);
        assert_eq!(report.table.total_pct(), dec!(100));
        assert_eq!(report.summary.by_access.get("Private"), Some(dec!(20)));
    }

    #[test]
    fn test_report_unbalanced_still_aggregates() {
        let holdings = Holdings::from_pairs([("US Stock ETF", dec!(70))]).unwrap();
        let config = AggregationConfig::new().with_view(TableView::LeavesOnly);
        let report = build_report(&holdings, dec!(1000), &taxonomy(), &config);

        assert!(!report.allocation_check.within_tolerance);
        assert_eq!(report.allocation_check.deviation, dec!(-30));
        assert!(report.warning().is_some());
        assert_eq!(report.table.len(), 1);
        assert_eq!(report.table.rows()[0].allocation_value, dec!(700));
        assert!(report.unclassified.is_empty());
    }

    #[test]
    fn test_report_empty() {
        let report = build_report(&Holdings::new(), dec!(1000), &taxonomy(), &AggregationConfig::default());
        assert!(report.table.is_empty());
        assert!(report.summary.by_liquidity.is_empty());
        assert!(!report.allocation_check.within_tolerance);
    }
}
