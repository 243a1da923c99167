//! CLI command implementations.

pub mod config;
pub mod export;
pub mod holdings;
pub mod rollup;
pub mod summary;
pub mod sunburst;

pub use config::ConfigArgs;
pub use export::ExportArgs;
pub use holdings::HoldingsArgs;
pub use rollup::RollupArgs;
pub use summary::SummaryArgs;
pub use sunburst::SunburstArgs;

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use strata_portfolio::{AllocationCheck, Holdings, TaxonomyTable, MAX_TOTAL_VALUE};

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output::print_warning;
use crate::settings::Settings;

/// State shared by every command.
pub struct Context {
    /// Output format
    pub format: OutputFormat,
    /// Suppress non-essential output
    pub quiet: bool,
    /// Explicit settings file, if any
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Loads the settings this invocation should use.
    pub fn settings(&self) -> CliResult<Settings> {
        Settings::load(self.config_path.as_deref())
    }
}

/// Taxonomy and holdings file flags shared by the reporting commands.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Taxonomy file (CSV with an Asset column, or JSON)
    #[arg(short, long, global = true, env = "STRATA_TAXONOMY")]
    pub taxonomy: Option<PathBuf>,

    /// Holdings file (JSON object of asset name to percent)
    #[arg(long, global = true, env = "STRATA_HOLDINGS")]
    pub holdings: Option<PathBuf>,
}

impl InputArgs {
    /// Taxonomy path from the flag, falling back to settings.
    pub fn taxonomy_path(&self, settings: &Settings) -> CliResult<PathBuf> {
        self.taxonomy
            .clone()
            .or_else(|| settings.taxonomy_file.clone())
            .ok_or(CliError::MissingTaxonomy)
    }

    /// Holdings path from the flag, falling back to settings.
    pub fn holdings_path(&self, settings: &Settings) -> CliResult<PathBuf> {
        self.holdings
            .clone()
            .or_else(|| settings.holdings_file.clone())
            .ok_or(CliError::MissingHoldings)
    }

    /// Loads both input files.
    pub fn load(&self, settings: &Settings) -> CliResult<(TaxonomyTable, Holdings)> {
        let taxonomy = load_taxonomy(&self.taxonomy_path(settings)?)?;
        let holdings = load_holdings(&self.holdings_path(settings)?)?;
        Ok((taxonomy, holdings))
    }
}

/// Loads a taxonomy table from CSV or JSON.
pub fn load_taxonomy(path: &Path) -> CliResult<TaxonomyTable> {
    let taxonomy = TaxonomyTable::from_path(path)?;
    debug!(path = %path.display(), assets = taxonomy.len(), "loaded taxonomy");
    Ok(taxonomy)
}

/// Loads and validates a JSON holdings file.
pub fn load_holdings(path: &Path) -> CliResult<Holdings> {
    let content = fs::read_to_string(path)?;
    let raw: Holdings =
        serde_json::from_str(&content).map_err(strata_portfolio::StrataError::from)?;
    let holdings = Holdings::from_pairs(raw.iter().map(|(asset, pct)| (asset.to_string(), pct)))?;
    debug!(path = %path.display(), holdings = holdings.len(), "loaded holdings");
    Ok(holdings)
}

/// Loads a holdings file, or starts empty if it does not exist yet.
pub fn load_holdings_or_default(path: &Path) -> CliResult<Holdings> {
    if path.exists() {
        load_holdings(path)
    } else {
        Ok(Holdings::new())
    }
}

/// Writes a holdings file as pretty JSON.
pub fn save_holdings(path: &Path, holdings: &Holdings) -> CliResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let content =
        serde_json::to_string_pretty(holdings).map_err(|e| CliError::Serialization(e.to_string()))?;
    fs::write(path, content)?;
    Ok(())
}

/// Resolves the total portfolio value from the flag or settings.
pub fn resolve_total_value(flag: Option<Decimal>, settings: &Settings) -> CliResult<Decimal> {
    let value = flag.or(settings.total_value).ok_or(CliError::MissingTotalValue)?;
    validate_total_value(value)
}

/// Validates a total portfolio value against `[0, MAX_TOTAL_VALUE]`.
pub fn validate_total_value(value: Decimal) -> CliResult<Decimal> {
    if value < Decimal::ZERO || value > MAX_TOTAL_VALUE {
        return Err(CliError::InvalidTotalValue(value.to_string()));
    }
    Ok(value)
}

/// Prints the advisory for allocations that do not sum to 100%.
pub fn report_allocation_check(check: &AllocationCheck, quiet: bool) {
    if let Some(message) = check.warning() {
        warn!(total_pct = %check.total_pct, "allocation total outside tolerance");
        if !quiet {
            print_warning(&message);
        }
    }
}
