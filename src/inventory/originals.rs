//! Append-only store of pristine source text and the per-page translation context.

use std::collections::HashMap;

use super::TranslatableUnit;

/// Mapping from unit key to the text first observed for that key.
///
/// Entries are never overwritten: a later collection that sees already
/// translated text for a known key leaves the stored original alone.
#[derive(Debug, Clone, Default)]
pub struct OriginalStore {
    /// key -> pristine text.
    entries: HashMap<String, String>,
}

impl OriginalStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// What: Record the pristine text for a key if it has not been seen yet.
    ///
    /// Inputs:
    /// - `key`: Unit key
    /// - `text`: Text observed now
    ///
    /// Output:
    /// - `true` when the key was new and `text` was stored
    pub fn record(&mut self, key: &str, text: &str) -> bool {
        if self.entries.contains_key(key) {
            return false;
        }
        self.entries.insert(key.to_string(), text.to_string());
        true
    }

    /// Pristine text for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// What: Pristine text for a unit, falling back to its observed text.
    ///
    /// Inputs:
    /// - `unit`: Collected unit
    ///
    /// Output:
    /// - Stored original, or `unit.current_text` when the key is unknown
    #[must_use]
    pub fn pristine<'a>(&'a self, unit: &'a TranslatableUnit) -> &'a str {
        self.get(&unit.key).unwrap_or(&unit.current_text)
    }

    /// Pristine texts for `units`, positionally aligned.
    #[must_use]
    pub fn pristine_texts(&self, units: &[TranslatableUnit]) -> Vec<String> {
        units
            .iter()
            .map(|u| self.pristine(u).to_string())
            .collect()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no key has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// State carried across translation cycles of one page load.
///
/// Created once per controller; the original store only grows and the
/// inventory is replaced on every collection.
#[derive(Debug, Clone, Default)]
pub struct TranslationContext {
    /// Pristine text per key.
    pub originals: OriginalStore,
    /// Units from the most recent collection.
    pub last_inventory: Vec<TranslatableUnit>,
}

impl TranslationContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
