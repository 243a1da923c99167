//! Sunburst chart nodes derived from the hierarchical table.

use super::hierarchy::HierarchicalTable;
use crate::types::TaxonomyLevel;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Separator between path segments in node identifiers.
pub const PATH_SEPARATOR: &str = " / ";

/// One wedge of a sunburst chart.
///
/// `id` is the row's full taxonomy path and `parent` the path one level up
/// (empty for top-level wedges), the shape charting libraries expect for
/// id/parent hierarchies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunburstNode {
    /// Unique path identifier.
    pub id: String,
    /// Identifier of the enclosing wedge, empty at the top level.
    pub parent: String,
    /// Display label: the most specific taxonomy value.
    pub label: String,
    /// Taxonomy level of the wedge.
    pub level: TaxonomyLevel,
    /// Allocation in percent.
    pub allocation_pct: Decimal,
    /// Allocation in currency units.
    pub allocation_value: Decimal,
}

/// Converts every row of `table` into a sunburst node, preserving order.
///
/// Use the full table: a leaves-only table yields nodes whose parents are
/// missing.
#[must_use]
pub fn sunburst_nodes(table: &HierarchicalTable) -> Vec<SunburstNode> {
    table
        .iter()
        .map(|row| {
            let path = row.path();
            let parent = match path.split_last() {
                Some((_, init)) => init.join(PATH_SEPARATOR),
                None => String::new(),
            };
            SunburstNode {
                id: path.join(PATH_SEPARATOR),
                parent,
                label: row.label().to_string(),
                level: row.level,
                allocation_pct: row.allocation_pct,
                allocation_value: row.allocation_value,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::TaxonomyTable;
    use crate::rollup::aggregate;
    use crate::types::{ClassificationEntry, Holdings};
    use rust_decimal_macros::dec;
    use std::collections::HashSet;

    fn table() -> HierarchicalTable {
        let taxonomy = TaxonomyTable::from_entries([(
            "US Stock ETF",
            ClassificationEntry::new("Traditional", "Public", "Equity", "Highly Liquid", "US Stock ETF"),
        )]);
        let holdings = Holdings::from_pairs([("US Stock ETF", dec!(75)), ("Vineyard", dec!(25))]).unwrap();
        aggregate(&holdings, dec!(400), &taxonomy)
    }

    #[test]
    fn test_nodes_link_to_parents() {
        let nodes = sunburst_nodes(&table());
        assert_eq!(nodes.len(), 10);

        let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids.len(), nodes.len(), "ids must be unique");
        for node in &nodes {
            if node.level == TaxonomyLevel::Classification {
                assert!(node.parent.is_empty());
            } else {
                assert!(ids.contains(node.parent.as_str()), "missing parent {}", node.parent);
            }
        }
    }

    #[test]
    fn test_node_contents() {
        let nodes = sunburst_nodes(&table());
        let leaf = nodes
            .iter()
            .find(|n| n.label == "US Stock ETF")
            .unwrap();
        assert_eq!(leaf.id, "Traditional / Public / Equity / Highly Liquid / US Stock ETF");
        assert_eq!(leaf.parent, "Traditional / Public / Equity / Highly Liquid");
        assert_eq!(leaf.allocation_value, dec!(300));

        // Fallback rows keep their empty asset class as a path segment
        let vineyard = nodes.iter().find(|n| n.label == "Vineyard").unwrap();
        assert_eq!(vineyard.id, "Alternative /  /  / Illiquid / Vineyard");
        assert_eq!(vineyard.allocation_pct, dec!(25));
    }

    #[test]
    fn test_empty_table() {
        assert!(sunburst_nodes(&HierarchicalTable::default()).is_empty());
    }
}
