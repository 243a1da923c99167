//! Rollup command implementation.
//!
//! Prints the hierarchical allocation table.

use std::io;

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;

use strata_portfolio::{build_report, write_csv, TableView};

use crate::cli::OutputFormat;
use crate::commands::{report_allocation_check, resolve_total_value, Context, InputArgs};
use crate::output::{format_value, print_header, print_info, print_json, print_table, RollupRow};

/// Arguments for the rollup command.
#[derive(Args, Debug)]
pub struct RollupArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Total portfolio value in dollars
    #[arg(long)]
    pub total_value: Option<Decimal>,

    /// Show only leaf rows (one per instrument/manager)
    #[arg(long)]
    pub leaves_only: bool,
}

/// Execute the rollup command.
pub fn execute(args: RollupArgs, ctx: &Context) -> Result<()> {
    let settings = ctx.settings()?;
    let (taxonomy, holdings) = args.inputs.load(&settings)?;
    let total_value = resolve_total_value(args.total_value, &settings)?;

    let mut config = settings.aggregation.clone();
    if args.leaves_only {
        config = config.with_view(TableView::LeavesOnly);
    }

    let report = build_report(&holdings, total_value, &taxonomy, &config);
    report_allocation_check(&report.allocation_check, ctx.quiet);

    match ctx.format {
        OutputFormat::Table => {
            if !ctx.quiet {
                print_header(&format!(
                    "Portfolio Rollup ({}, total ${})",
                    config.view,
                    format_value(total_value)
                ));
            }
            let rows: Vec<RollupRow> = report.table.iter().map(RollupRow::from).collect();
            print_table(&rows)?;
            if !ctx.quiet && !report.unclassified.is_empty() {
                print_info(&format!(
                    "Not in taxonomy (classified as Alternative / Illiquid): {}",
                    report.unclassified.join(", ")
                ));
            }
        }
        OutputFormat::Json => print_json(report.table.rows())?,
        OutputFormat::Csv => write_csv(&report.table, io::stdout().lock())?,
    }

    Ok(())
}
