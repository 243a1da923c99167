//! Taxonomy table loaded from CSV or JSON.

use super::source::ClassificationSource;
use crate::error::{StrataError, StrataResult};
use crate::types::{ClassificationEntry, TaxonomyLevel};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Header of the asset key column in taxonomy files.
pub const ASSET_COLUMN: &str = "Asset";

/// Read-only table of asset classifications.
///
/// Loaded once per session and then only read, so it can be shared freely
/// (e.g. behind an `Arc`) between sessions that each own their holdings.
///
/// # Examples
///
/// ```
/// use strata_portfolio::classification::{ClassificationSource, TaxonomyTable};
///
/// let csv = "\
/// Asset,Classification,Asset Class,Sub-Asset Class,Liquidity,Instrument/Manager
/// US Stock ETF,Traditional,Public,Equity,Highly Liquid,US Stock ETF
/// ";
/// let table = TaxonomyTable::from_csv_reader(csv.as_bytes()).unwrap();
/// assert_eq!(table.resolve("US Stock ETF").asset_class, "Public");
/// assert_eq!(table.resolve("Gold").classification, "Alternative");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxonomyTable {
    entries: BTreeMap<String, ClassificationEntry>,
}

/// One row of a taxonomy CSV file.
#[derive(Debug, Deserialize)]
struct TaxonomyRecord {
    #[serde(rename = "Asset")]
    asset: String,
    #[serde(rename = "Classification")]
    classification: String,
    #[serde(rename = "Asset Class")]
    asset_class: String,
    #[serde(rename = "Sub-Asset Class")]
    sub_asset_class: String,
    #[serde(rename = "Liquidity")]
    liquidity: String,
    #[serde(rename = "Instrument/Manager")]
    instrument_manager: String,
}

/// One value of a taxonomy JSON object; the leaf may be omitted.
#[derive(Debug, Deserialize)]
struct TaxonomyJsonEntry {
    #[serde(rename = "Classification")]
    classification: String,
    #[serde(rename = "Asset Class")]
    asset_class: String,
    #[serde(rename = "Sub-Asset Class")]
    sub_asset_class: String,
    #[serde(rename = "Liquidity")]
    liquidity: String,
    #[serde(rename = "Instrument/Manager", default)]
    instrument_manager: Option<String>,
}

fn leaf_or_asset(leaf: Option<String>, asset: &str) -> String {
    match leaf {
        Some(leaf) if !leaf.trim().is_empty() => leaf,
        _ => asset.to_string(),
    }
}

impl TaxonomyTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(asset, entry)` pairs. Later duplicates win.
    #[must_use]
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, ClassificationEntry)>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (asset, entry) in entries {
            table.insert(asset, entry);
        }
        table
    }

    /// Inserts or replaces the classification for an asset.
    ///
    /// Returns the entry previously stored for the asset.
    pub fn insert(
        &mut self,
        asset: impl Into<String>,
        entry: ClassificationEntry,
    ) -> Option<ClassificationEntry> {
        self.entries.insert(asset.into(), entry)
    }

    /// Loads a table from CSV with an `Asset` column followed by the five
    /// taxonomy columns. Cells are trimmed.
    ///
    /// An empty `Instrument/Manager` cell defaults to the asset name. When an
    /// asset appears more than once the last row wins.
    ///
    /// # Errors
    ///
    /// Returns an error if a required column is missing, a row cannot be
    /// parsed, or a row has an empty asset name.
    pub fn from_csv_reader<R: Read>(reader: R) -> StrataResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let required = std::iter::once(ASSET_COLUMN)
            .chain(TaxonomyLevel::ALL.iter().map(|l| l.column_name()));
        for column in required {
            if !headers.iter().any(|h| h == column) {
                return Err(StrataError::missing_column(column));
            }
        }

        let mut table = Self::new();
        for result in reader.records() {
            let record = result?;
            let line = record.position().map_or(0, |p| p.line());
            let row: TaxonomyRecord = record
                .deserialize(Some(&headers))
                .map_err(|e| StrataError::taxonomy_load(line, e.to_string()))?;

            if row.asset.is_empty() {
                return Err(StrataError::taxonomy_load(line, "empty asset name"));
            }

            let instrument_manager = leaf_or_asset(Some(row.instrument_manager), &row.asset);
            let entry = ClassificationEntry::new(
                row.classification,
                row.asset_class,
                row.sub_asset_class,
                row.liquidity,
                instrument_manager,
            );
            if table.insert(row.asset.clone(), entry).is_some() {
                warn!(asset = %row.asset, line, "duplicate taxonomy row; keeping the last one");
            }
        }

        debug!(assets = table.len(), "loaded taxonomy from csv");
        Ok(table)
    }

    /// Loads a CSV taxonomy file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed.
    pub fn from_csv_path(path: impl AsRef<Path>) -> StrataResult<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_csv_reader(std::io::BufReader::new(file))
    }

    /// Loads a table from a JSON object keyed by asset name.
    ///
    /// `Instrument/Manager` may be omitted and defaults to the asset name.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, a required field is missing,
    /// or an asset name is empty.
    pub fn from_json_str(json: &str) -> StrataResult<Self> {
        let raw: BTreeMap<String, TaxonomyJsonEntry> = serde_json::from_str(json)?;

        let mut table = Self::new();
        for (asset, value) in raw {
            if asset.trim().is_empty() {
                return Err(StrataError::invalid_asset(format!(
                    "taxonomy key {asset:?} is an empty asset name"
                )));
            }
            let instrument_manager = leaf_or_asset(value.instrument_manager, &asset);
            let entry = ClassificationEntry::new(
                value.classification,
                value.asset_class,
                value.sub_asset_class,
                value.liquidity,
                instrument_manager,
            );
            table.insert(asset, entry);
        }

        debug!(assets = table.len(), "loaded taxonomy from json");
        Ok(table)
    }

    /// Loads a JSON taxonomy file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_json_path(path: impl AsRef<Path>) -> StrataResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Loads a taxonomy file, choosing the parser by extension
    /// (`.json` for JSON, anything else as CSV).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> StrataResult<Self> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_path(path)
        } else {
            Self::from_csv_path(path)
        }
    }

    /// Returns the number of classified assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if the asset has an entry.
    #[must_use]
    pub fn contains(&self, asset: &str) -> bool {
        self.entries.contains_key(asset)
    }

    /// Returns the classified asset names in sorted order.
    ///
    /// This is the universe of selectable assets offered to users.
    #[must_use]
    pub fn assets(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Iterates `(asset, entry)` pairs in asset-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClassificationEntry)> {
        self.entries.iter().map(|(a, e)| (a.as_str(), e))
    }
}

impl ClassificationSource for TaxonomyTable {
    fn lookup(&self, asset: &str) -> Option<&ClassificationEntry> {
        self.entries.get(asset)
    }
}
