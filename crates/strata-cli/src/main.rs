//! Strata CLI - Hierarchical portfolio classification rollups.
//!
//! # Usage
//!
//! ```bash
//! # Hierarchical table across all five taxonomy levels
//! strata rollup --taxonomy taxonomy.csv --holdings holdings.json --total-value 1000000
//!
//! # Allocation by classification, access and liquidity
//! strata summary --taxonomy taxonomy.csv --holdings holdings.json
//!
//! # Edit the holdings file
//! strata holdings --holdings holdings.json add "US Stock ETF" 60
//!
//! # Export leaf rows to CSV
//! strata export --taxonomy taxonomy.csv --holdings holdings.json \
//!     --total-value 1000000 --leaves-only --output rollup.csv
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;
mod settings;

use cli::{Cli, Commands};
use commands::Context;

fn init_logging(verbose: bool, quiet: bool) {
    let default = if verbose {
        "strata=debug"
    } else if quiet {
        "strata=error"
    } else {
        "strata=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let ctx = Context {
        format: cli.format,
        quiet: cli.quiet,
        config_path: cli.config,
    };

    match cli.command {
        Commands::Rollup(args) => commands::rollup::execute(args, &ctx)?,
        Commands::Summary(args) => commands::summary::execute(args, &ctx)?,
        Commands::Sunburst(args) => commands::sunburst::execute(args, &ctx)?,
        Commands::Export(args) => commands::export::execute(args, &ctx)?,
        Commands::Holdings(args) => commands::holdings::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        output::print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
    Ok(())
}
