//! Export command implementation.
//!
//! Writes the hierarchical table, or the flat summaries, to a CSV file.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use tracing::info;

use strata_portfolio::{build_report, write_csv, write_summary_csv, TableView};

use crate::commands::{report_allocation_check, resolve_total_value, Context, InputArgs};
use crate::output::print_success;

/// Arguments for the export command.
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Total portfolio value in dollars
    #[arg(long)]
    pub total_value: Option<Decimal>,

    /// Output CSV file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Export only leaf rows
    #[arg(long, conflicts_with = "summary")]
    pub leaves_only: bool,

    /// Export the classification/access/liquidity summaries instead
    #[arg(long)]
    pub summary: bool,
}

/// Execute the export command.
pub fn execute(args: ExportArgs, ctx: &Context) -> Result<()> {
    let settings = ctx.settings()?;
    let (taxonomy, holdings) = args.inputs.load(&settings)?;
    let total_value = resolve_total_value(args.total_value, &settings)?;

    let mut config = settings.aggregation.clone();
    if args.leaves_only {
        config = config.with_view(TableView::LeavesOnly);
    }

    let report = build_report(&holdings, total_value, &taxonomy, &config);
    report_allocation_check(&report.allocation_check, ctx.quiet);

    let writer = BufWriter::new(File::create(&args.output)?);
    let what = if args.summary {
        write_summary_csv(&report.summary, writer)?;
        "summary"
    } else {
        write_csv(&report.table, writer)?;
        "rollup"
    };

    info!(path = %args.output.display(), rows = report.table.len(), "exported {what}");
    if !ctx.quiet {
        print_success(&format!("Exported {} to {}", what, args.output.display()));
    }
    Ok(())
}
