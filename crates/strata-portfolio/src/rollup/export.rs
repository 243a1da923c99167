//! Delimited-text export of rollup tables.

use super::hierarchy::{AggregateRow, HierarchicalTable};
use super::summary::ClassificationSummary;
use crate::error::StrataResult;
use crate::types::TaxonomyLevel;
use std::io::Write;

/// Header of the percentage column.
pub const ALLOCATION_PCT_COLUMN: &str = "Allocation (%)";

/// Header of the currency column.
pub const ALLOCATION_VALUE_COLUMN: &str = "Allocation ($)";

/// Column headers of the hierarchical table, in export order.
#[must_use]
pub fn table_columns() -> Vec<&'static str> {
    TaxonomyLevel::ALL
        .iter()
        .map(|l| l.column_name())
        .chain([ALLOCATION_PCT_COLUMN, ALLOCATION_VALUE_COLUMN])
        .collect()
}

fn row_record(row: &AggregateRow) -> Vec<String> {
    TaxonomyLevel::ALL
        .iter()
        .map(|l| row.field(*l).unwrap_or_default().to_string())
        .chain([
            row.allocation_pct.normalize().to_string(),
            row.allocation_value.normalize().to_string(),
        ])
        .collect()
}

/// Writes the hierarchical table as CSV.
///
/// Columns follow [`table_columns`]; fields not populated at a row's level
/// are written as empty cells.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_csv<W: Write>(table: &HierarchicalTable, writer: W) -> StrataResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(table_columns())?;
    for row in table.iter() {
        wtr.write_record(row_record(row))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Renders the hierarchical table as a CSV string.
///
/// # Errors
///
/// Returns an error if CSV encoding fails.
pub fn to_csv_string(table: &HierarchicalTable) -> StrataResult<String> {
    let mut buf = Vec::new();
    write_csv(table, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Writes the three flat summaries as CSV with columns
/// `Dimension,Category,Allocation (%)`.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_summary_csv<W: Write>(summary: &ClassificationSummary, writer: W) -> StrataResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["Dimension", "Category", ALLOCATION_PCT_COLUMN])?;
    for dist in summary.iter() {
        for (category, pct) in dist.sorted_by_key() {
            let pct = pct.normalize().to_string();
            wtr.write_record([dist.dimension.name(), category, pct.as_str()])?;
        }
    }
    wtr.flush()?;
    Ok(())
}
