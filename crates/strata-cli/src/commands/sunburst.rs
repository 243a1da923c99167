//! Sunburst command implementation.

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;

use strata_portfolio::{aggregate, sunburst_nodes};

use crate::cli::OutputFormat;
use crate::commands::{report_allocation_check, resolve_total_value, Context, InputArgs};
use crate::output::{print_json, print_output, SunburstRow};

/// Arguments for the sunburst command.
#[derive(Args, Debug)]
pub struct SunburstArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Total portfolio value in dollars
    #[arg(long)]
    pub total_value: Option<Decimal>,
}

/// Execute the sunburst command.
pub fn execute(args: SunburstArgs, ctx: &Context) -> Result<()> {
    let settings = ctx.settings()?;
    let (taxonomy, holdings) = args.inputs.load(&settings)?;
    let total_value = resolve_total_value(args.total_value, &settings)?;

    report_allocation_check(
        &holdings.check_total(settings.aggregation.total_tolerance),
        ctx.quiet,
    );

    // Sunburst parents need every level, whatever the configured view.
    let table = aggregate(&holdings, total_value, &taxonomy);
    let nodes = sunburst_nodes(&table);

    match ctx.format {
        OutputFormat::Json => print_json(&nodes)?,
        format => {
            let rows: Vec<SunburstRow> = nodes.iter().map(SunburstRow::from).collect();
            print_output(&rows, format)?;
        }
    }

    Ok(())
}
