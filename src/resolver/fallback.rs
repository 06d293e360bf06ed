//! Static quick fallback table used when no remote tier succeeds.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Exact-match table from pristine source text (trimmed) to translated text,
/// valid for one target language only.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuickFallbackTable {
    /// Target language the entries were written for.
    pub language: String,
    /// Trimmed source text -> translation.
    #[serde(default)]
    pub entries: HashMap<String, String>,
}

/// Entries of the built-in table (German UI strings to English).
const BUILTIN_EN: &[(&str, &str)] = &[
    ("Startseite", "Home"),
    ("Über uns", "About"),
    ("Lizenz", "License"),
    ("Datenschutz", "Privacy"),
    ("Impressum", "Imprint"),
    ("Barrierefreiheit", "Accessibility"),
    ("Kontakt", "Contact"),
    (
        "© 2025 FlowTech Innovations GmbH — Alle Rechte vorbehalten.",
        "© 2025 FlowTech Innovations GmbH — All rights reserved.",
    ),
];

impl Default for QuickFallbackTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl QuickFallbackTable {
    /// Built-in German to English table for common navigation and footer strings.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            language: "en".to_string(),
            entries: BUILTIN_EN
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }

    /// What: Look up the translation of a pristine text.
    ///
    /// Inputs:
    /// - `target`: Requested target language
    /// - `pristine`: Original text (trimmed before lookup)
    ///
    /// Output:
    /// - `Some(translation)` only for the table's language and an exact match
    #[must_use]
    pub fn lookup(&self, target: &str, pristine: &str) -> Option<&str> {
        if !self.language.eq_ignore_ascii_case(target) {
            return None;
        }
        self.entries.get(pristine.trim()).map(String::as_str)
    }

    /// What: Parse a table from YAML.
    ///
    /// Inputs:
    /// - `yaml`: Document of the form `{ language: en, entries: { "Startseite": "Home" } }`
    ///
    /// Output:
    /// - Parsed table, or an error message
    ///
    /// # Errors
    /// - Returns `Err` when the YAML cannot be parsed or `language` is empty
    pub fn from_yaml_str(yaml: &str) -> Result<Self, String> {
        let mut table: Self =
            serde_norway::from_str(yaml).map_err(|e| format!("Failed to parse YAML: {e}"))?;
        if table.language.trim().is_empty() {
            return Err("Fallback table language cannot be empty".to_string());
        }
        table.language = table.language.trim().to_string();
        table.entries = table
            .entries
            .into_iter()
            .map(|(k, v)| (k.trim().to_string(), v))
            .collect();
        Ok(table)
    }

    /// What: Load a table file.
    ///
    /// Inputs:
    /// - `path`: YAML file
    ///
    /// Output:
    /// - Parsed table, or an error message naming the file
    ///
    /// # Errors
    /// - Returns `Err` when the file is missing, unreadable, empty, or invalid
    pub fn load(path: &Path) -> Result<Self, String> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read fallback table {}: {e}", path.display()))?;
        if contents.trim().is_empty() {
            return Err(format!("Fallback table is empty: {}", path.display()));
        }
        Self::from_yaml_str(&contents)
            .map_err(|e| format!("Invalid fallback table {}: {e}", path.display()))
    }
}
