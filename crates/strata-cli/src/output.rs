//! Output formatting utilities.

use std::io;

use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use strata_portfolio::{AggregateRow, SunburstNode};

use crate::cli::OutputFormat;

/// Formats and prints rows based on the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
    }
}

/// Prints data as a formatted table.
pub fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
    Ok(())
}

/// Prints any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Formats a percentage allocation (already in percent units).
pub fn format_pct(value: Decimal) -> String {
    format!("{:.2}%", value)
}

/// Formats a dollar amount.
pub fn format_value(value: Decimal) -> String {
    format!("{:.2}", value)
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Name")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Display row for the hierarchical table.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct RollupRow {
    #[tabled(rename = "Level")]
    pub level: usize,
    #[tabled(rename = "Classification")]
    pub classification: String,
    #[tabled(rename = "Asset Class")]
    pub asset_class: String,
    #[tabled(rename = "Sub-Asset Class")]
    pub sub_asset_class: String,
    #[tabled(rename = "Liquidity")]
    pub liquidity: String,
    #[tabled(rename = "Instrument/Manager")]
    pub instrument_manager: String,
    #[tabled(rename = "Allocation (%)")]
    pub allocation_pct: String,
    #[tabled(rename = "Allocation ($)")]
    pub allocation_value: String,
}

impl From<&AggregateRow> for RollupRow {
    fn from(row: &AggregateRow) -> Self {
        let cell = |field: &Option<String>| field.clone().unwrap_or_default();
        Self {
            level: row.level.depth(),
            classification: cell(&row.classification),
            asset_class: cell(&row.asset_class),
            sub_asset_class: cell(&row.sub_asset_class),
            liquidity: cell(&row.liquidity),
            instrument_manager: cell(&row.instrument_manager),
            allocation_pct: format_pct(row.allocation_pct),
            allocation_value: format_value(row.allocation_value),
        }
    }
}

/// Display row for one category of a flat summary.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct CategoryRow {
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Allocation (%)")]
    pub allocation_pct: String,
}

impl CategoryRow {
    pub fn new(category: &str, pct: Decimal) -> Self {
        Self {
            category: category.to_string(),
            allocation_pct: format_pct(pct),
        }
    }
}

/// Display row for a sunburst node.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct SunburstRow {
    #[tabled(rename = "Id")]
    pub id: String,
    #[tabled(rename = "Parent")]
    pub parent: String,
    #[tabled(rename = "Label")]
    pub label: String,
    #[tabled(rename = "Allocation (%)")]
    pub allocation_pct: String,
    #[tabled(rename = "Allocation ($)")]
    pub allocation_value: String,
}

impl From<&SunburstNode> for SunburstRow {
    fn from(node: &SunburstNode) -> Self {
        Self {
            id: node.id.clone(),
            parent: node.parent.clone(),
            label: node.label.clone(),
            allocation_pct: format_pct(node.allocation_pct),
            allocation_value: format_value(node.allocation_value),
        }
    }
}

/// Display row for one holding.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct HoldingRow {
    #[tabled(rename = "Asset")]
    pub asset: String,
    #[tabled(rename = "Allocation (%)")]
    pub allocation_pct: String,
    #[tabled(rename = "Classified")]
    pub classified: String,
}
