//! Holdings command implementation.
//!
//! Adds, removes and lists assets in a JSON holdings file.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use tracing::info;

use strata_portfolio::{ClassificationSource, Holdings, TaxonomyTable};

use crate::cli::OutputFormat;
use crate::commands::{
    load_holdings, load_holdings_or_default, load_taxonomy, report_allocation_check,
    save_holdings, Context, InputArgs,
};
use crate::error::CliError;
use crate::output::{
    format_pct, print_header, print_info, print_json, print_output, print_success, print_warning,
    HoldingRow, KeyValue,
};
use crate::settings::Settings;

/// Arguments for the holdings command.
#[derive(Args, Debug)]
pub struct HoldingsArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    #[command(subcommand)]
    pub command: HoldingsCommand,
}

/// Holdings subcommands.
#[derive(Subcommand, Debug)]
pub enum HoldingsCommand {
    /// List current holdings
    List,

    /// Add an asset, or change the allocation of one already held
    Add(AddArgs),

    /// Remove an asset
    Remove(RemoveArgs),

    /// List taxonomy assets that are not held yet
    Available,
}

/// Arguments for add subcommand.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Asset name
    pub asset: String,

    /// Allocation in percent (0-100)
    pub pct: Decimal,
}

/// Arguments for remove subcommand.
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Asset name
    pub asset: String,
}

/// Execute the holdings command.
pub fn execute(args: HoldingsArgs, ctx: &Context) -> Result<()> {
    let settings = ctx.settings()?;
    match args.command {
        HoldingsCommand::List => execute_list(&args.inputs, &settings, ctx),
        HoldingsCommand::Add(add_args) => execute_add(add_args, &args.inputs, &settings, ctx),
        HoldingsCommand::Remove(remove_args) => {
            execute_remove(remove_args, &args.inputs, &settings, ctx)
        }
        HoldingsCommand::Available => execute_available(&args.inputs, &settings, ctx),
    }
}

/// Loads the taxonomy only when one is configured.
fn optional_taxonomy(inputs: &InputArgs, settings: &Settings) -> Result<Option<TaxonomyTable>> {
    match inputs.taxonomy_path(settings) {
        Ok(path) => Ok(Some(load_taxonomy(&path)?)),
        Err(CliError::MissingTaxonomy) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// List current holdings.
fn execute_list(inputs: &InputArgs, settings: &Settings, ctx: &Context) -> Result<()> {
    let holdings = load_holdings(&inputs.holdings_path(settings)?)?;
    let taxonomy = optional_taxonomy(inputs, settings)?;

    report_allocation_check(
        &holdings.check_total(settings.aggregation.total_tolerance),
        ctx.quiet,
    );

    if ctx.format == OutputFormat::Json {
        return print_json(&holdings);
    }

    let rows: Vec<HoldingRow> = holdings
        .iter()
        .map(|(asset, pct)| HoldingRow {
            asset: asset.to_string(),
            allocation_pct: format_pct(pct),
            classified: match &taxonomy {
                Some(t) if t.is_classified(asset) => "yes".to_string(),
                Some(_) => "no".to_string(),
                None => "-".to_string(),
            },
        })
        .collect();

    if ctx.format == OutputFormat::Table && !ctx.quiet {
        print_header("Holdings");
    }
    print_output(&rows, ctx.format)?;
    if ctx.format == OutputFormat::Table && !ctx.quiet {
        print_info(&format!("Total: {}", format_pct(holdings.total_pct())));
    }
    Ok(())
}

/// Add or update a holding.
fn execute_add(args: AddArgs, inputs: &InputArgs, settings: &Settings, ctx: &Context) -> Result<()> {
    let path = inputs.holdings_path(settings)?;
    let mut holdings = load_holdings_or_default(&path)?;
    let taxonomy = optional_taxonomy(inputs, settings)?;
    let asset = args.asset.trim().to_string();

    let previous = holdings.add_asset(asset.clone(), args.pct)?;
    save_holdings(&path, &holdings)?;
    info!(asset = %asset, pct = %args.pct, "holding saved");

    if !ctx.quiet {
        match previous {
            Some(old) => print_success(&format!(
                "Updated {}: {} -> {}",
                asset,
                format_pct(old),
                format_pct(args.pct)
            )),
            None => print_success(&format!("Added {} at {}", asset, format_pct(args.pct))),
        }
        if taxonomy.is_some_and(|t| !t.is_classified(&asset)) {
            print_warning(&format!(
                "{} is not in the taxonomy and will be classified as Alternative / Illiquid",
                asset
            ));
        }
    }
    report_allocation_check(
        &holdings.check_total(settings.aggregation.total_tolerance),
        ctx.quiet,
    );
    Ok(())
}

/// Remove a holding.
fn execute_remove(
    args: RemoveArgs,
    inputs: &InputArgs,
    settings: &Settings,
    ctx: &Context,
) -> Result<()> {
    let path = inputs.holdings_path(settings)?;
    let mut holdings = load_holdings(&path)?;
    let asset = args.asset.trim();

    let removed = holdings
        .remove_asset(asset)
        .ok_or_else(|| CliError::NotHeld(asset.to_string()))?;
    save_holdings(&path, &holdings)?;
    info!(asset = %asset, "holding removed");

    if !ctx.quiet {
        print_success(&format!("Removed {} ({})", asset, format_pct(removed)));
    }
    report_allocation_check(
        &holdings.check_total(settings.aggregation.total_tolerance),
        ctx.quiet,
    );
    Ok(())
}

/// List assets that can still be added.
fn execute_available(inputs: &InputArgs, settings: &Settings, ctx: &Context) -> Result<()> {
    let taxonomy = load_taxonomy(&inputs.taxonomy_path(settings)?)?;
    let holdings = match inputs.holdings_path(settings) {
        Ok(path) => load_holdings_or_default(&path)?,
        Err(_) => Holdings::new(),
    };

    let available = holdings.available_assets(taxonomy.assets());
    if ctx.format == OutputFormat::Json {
        return print_json(&available);
    }

    let rows: Vec<KeyValue> = available
        .iter()
        .filter_map(|asset| {
            taxonomy
                .lookup(asset)
                .map(|entry| KeyValue::new(*asset, entry.classification.clone()))
        })
        .collect();

    if ctx.format == OutputFormat::Table && !ctx.quiet {
        print_header("Available Assets");
    }
    print_output(&rows, ctx.format)
}
