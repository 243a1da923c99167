//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{
    ConfigArgs, ExportArgs, HoldingsArgs, RollupArgs, SummaryArgs, SunburstArgs,
};

/// Strata - Hierarchical portfolio classification rollups
#[derive(Parser)]
#[command(name = "strata")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Settings file (TOML). Defaults to the user config directory.
    #[arg(short, long, global = true, env = "STRATA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show the hierarchical allocation table (all five taxonomy levels)
    Rollup(RollupArgs),

    /// Show allocation by classification, access and liquidity
    Summary(SummaryArgs),

    /// Show sunburst chart nodes (id/parent hierarchy)
    Sunburst(SunburstArgs),

    /// Export the hierarchical table or summaries to a CSV file
    Export(ExportArgs),

    /// List, add or remove holdings
    Holdings(HoldingsArgs),

    /// Manage the settings file
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}
