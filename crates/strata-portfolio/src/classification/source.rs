//! Classification lookup with a total, fallback-returning resolve.

use crate::types::ClassificationEntry;
use std::collections::{BTreeMap, HashMap};

/// A read-only table of asset classifications keyed by asset identifier.
///
/// Implementors only provide [`lookup`](ClassificationSource::lookup); the
/// provided [`resolve`](ClassificationSource::resolve) never fails and
/// assigns [`ClassificationEntry::fallback`] to unknown assets.
pub trait ClassificationSource {
    /// Returns the entry stored for `asset`, if any. Matching is exact.
    fn lookup(&self, asset: &str) -> Option<&ClassificationEntry>;

    /// Resolves `asset` to its classification, falling back to the
    /// conservative default for unknown assets.
    fn resolve(&self, asset: &str) -> ClassificationEntry {
        self.lookup(asset)
            .cloned()
            .unwrap_or_else(|| ClassificationEntry::fallback(asset))
    }

    /// Returns true if `asset` has an explicit classification.
    fn is_classified(&self, asset: &str) -> bool {
        self.lookup(asset).is_some()
    }
}

/// Resolves `asset` against `source`.
///
/// Equivalent to [`ClassificationSource::resolve`]; provided for call sites
/// that prefer a free function.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use strata_portfolio::classification::resolve_classification;
/// use strata_portfolio::types::ClassificationEntry;
///
/// let source: HashMap<String, ClassificationEntry> = HashMap::new();
/// let entry = resolve_classification("Unknown Asset", &source);
/// assert_eq!(entry.classification, "Alternative");
/// assert_eq!(entry.liquidity, "Illiquid");
/// assert_eq!(entry.instrument_manager, "Unknown Asset");
/// ```
#[must_use]
pub fn resolve_classification<S>(asset: &str, source: &S) -> ClassificationEntry
where
    S: ClassificationSource + ?Sized,
{
    source.resolve(asset)
}

impl ClassificationSource for HashMap<String, ClassificationEntry> {
    fn lookup(&self, asset: &str) -> Option<&ClassificationEntry> {
        self.get(asset)
    }
}

impl ClassificationSource for BTreeMap<String, ClassificationEntry> {
    fn lookup(&self, asset: &str) -> Option<&ClassificationEntry> {
        self.get(asset)
    }
}

impl<S: ClassificationSource + ?Sized> ClassificationSource for &S {
    fn lookup(&self, asset: &str) -> Option<&ClassificationEntry> {
        (**self).lookup(asset)
    }
}

impl<S: ClassificationSource + ?Sized> ClassificationSource for std::sync::Arc<S> {
    fn lookup(&self, asset: &str) -> Option<&ClassificationEntry> {
        (**self).lookup(asset)
    }
}
