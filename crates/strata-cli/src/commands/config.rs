//! Config command implementation.
//!
//! Manages the TOML settings file.

use std::fs;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::error::CliError;
use crate::output::{print_header, print_info, print_json, print_output, print_success, KeyValue};
use crate::settings::{resolve_path, Settings};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective settings
    Show,

    /// Show settings file location
    Path,

    /// Write a settings file with default values
    Init(InitArgs),
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing settings file
    #[arg(long)]
    pub force: bool,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(ctx),
        ConfigCommand::Path => execute_path(ctx),
        ConfigCommand::Init(init_args) => execute_init(init_args, ctx),
    }
}

/// Show the effective settings.
fn execute_show(ctx: &Context) -> Result<()> {
    let settings = ctx.settings()?;

    if ctx.format == OutputFormat::Json {
        return print_json(&settings);
    }

    let display = |path: &Option<std::path::PathBuf>| {
        path.as_ref()
            .map_or_else(|| "(not set)".to_string(), |p| p.display().to_string())
    };
    let results = vec![
        KeyValue::new("taxonomy_file", display(&settings.taxonomy_file)),
        KeyValue::new("holdings_file", display(&settings.holdings_file)),
        KeyValue::new(
            "total_value",
            settings
                .total_value
                .map_or_else(|| "(not set)".to_string(), |v| v.to_string()),
        ),
        KeyValue::new("aggregation.view", settings.aggregation.view.name()),
        KeyValue::new(
            "aggregation.total_tolerance",
            settings.aggregation.total_tolerance.to_string(),
        ),
    ];

    if ctx.format == OutputFormat::Table {
        print_header("Current Settings");
    }
    print_output(&results, ctx.format)
}

/// Show settings file path.
fn execute_path(ctx: &Context) -> Result<()> {
    let path = resolve_path(ctx.config_path.as_deref())?;
    if ctx.quiet {
        println!("{}", path.display());
        return Ok(());
    }
    print_info(&format!("Settings file: {}", path.display()));
    if path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}

/// Write a default settings file.
fn execute_init(args: InitArgs, ctx: &Context) -> Result<()> {
    let path = resolve_path(ctx.config_path.as_deref())?;
    if path.exists() && !args.force {
        return Err(CliError::AlreadyExists(path).into());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, Settings::default().to_toml()?)?;

    if !ctx.quiet {
        print_success(&format!("Wrote {}", path.display()));
    }
    Ok(())
}
