//! Summary command implementation.
//!
//! Prints allocation by classification, access and liquidity.

use std::io;

use anyhow::Result;
use clap::Args;

use strata_portfolio::{summarize, write_summary_csv, SummaryDimension};

use crate::cli::OutputFormat;
use crate::commands::{report_allocation_check, Context, InputArgs};
use crate::output::{print_header, print_json, print_table, CategoryRow};

/// Arguments for the summary command.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub inputs: InputArgs,
}

/// Execute the summary command.
pub fn execute(args: SummaryArgs, ctx: &Context) -> Result<()> {
    let settings = ctx.settings()?;
    let (taxonomy, holdings) = args.inputs.load(&settings)?;

    report_allocation_check(
        &holdings.check_total(settings.aggregation.total_tolerance),
        ctx.quiet,
    );
    let summary = summarize(&holdings, &taxonomy);

    match ctx.format {
        OutputFormat::Table => {
            for distribution in summary.iter() {
                let sorted = match distribution.dimension {
                    SummaryDimension::Liquidity => distribution.sorted_by_liquidity(),
                    _ => distribution.sorted_by_weight(),
                };
                let rows: Vec<CategoryRow> = sorted
                    .into_iter()
                    .map(|(category, pct)| CategoryRow::new(category, pct))
                    .collect();
                print_header(&format!("By {}", distribution.dimension.name()));
                print_table(&rows)?;
            }
        }
        OutputFormat::Json => print_json(&summary)?,
        OutputFormat::Csv => write_summary_csv(&summary, io::stdout().lock())?,
    }

    Ok(())
}
