//! Persisted user preferences (language and theme).
//!
//! Two entries under fixed keys, read once at startup and written on every
//! successful change. Storage failures never propagate: they are logged and
//! the value is simply not persisted this time.

mod storage;

pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};

use std::fmt;

/// Storage key of the displayed language.
pub const LANGUAGE_KEY: &str = "site-lang";
/// Storage key of the colour theme.
pub const THEME_KEY: &str = "site-theme";

/// Colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    /// Light theme (default).
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

impl Theme {
    /// Stored name of the theme.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// What: Parse a stored theme name.
    ///
    /// Output:
    /// - `Some(theme)` for `light`/`dark` (case-insensitive); `None` otherwise
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user's last choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preference {
    /// Displayed language code.
    pub language: String,
    /// Colour theme.
    pub theme: Theme,
}

/// Preference access over a [`KeyValueStorage`] backend.
#[derive(Debug, Clone)]
pub struct PreferenceStore<S> {
    /// Backend.
    storage: S,
    /// Language reported when nothing (valid) is stored.
    default_language: String,
}

impl<S: KeyValueStorage> PreferenceStore<S> {
    /// What: Wrap a storage backend.
    ///
    /// Inputs:
    /// - `storage`: Backend
    /// - `default_language`: Language used when none is stored (the source language)
    pub fn new(storage: S, default_language: &str) -> Self {
        Self {
            storage,
            default_language: default_language.to_string(),
        }
    }

    /// Backend access.
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// What: Read both preferences.
    ///
    /// Output:
    /// - Stored values, with defaults for missing, invalid, or unreadable entries
    pub fn load(&self) -> Preference {
        let language = self
            .read(LANGUAGE_KEY)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| self.default_language.clone());
        let theme = self
            .read(THEME_KEY)
            .and_then(|v| Theme::from_config_key(&v))
            .unwrap_or_default();
        Preference { language, theme }
    }

    /// What: Persist the displayed language.
    ///
    /// Output:
    /// - `true` when the value was written
    pub fn save_language(&mut self, language: &str) -> bool {
        self.write(LANGUAGE_KEY, language)
    }

    /// What: Persist the colour theme.
    ///
    /// Output:
    /// - `true` when the value was written
    pub fn save_theme(&mut self, theme: Theme) -> bool {
        self.write(THEME_KEY, theme.as_str())
    }

    /// Read one entry, logging and swallowing backend errors.
    fn read(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(key, error = %e, "[Persist] Failed to read preference");
                None
            }
        }
    }

    /// Write one entry, logging and swallowing backend errors.
    fn write(&mut self, key: &str, value: &str) -> bool {
        match self.storage.set(key, value) {
            Ok(()) => {
                tracing::debug!(key, value, "[Persist] Preference persisted");
                true
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "[Persist] Failed to write preference");
                false
            }
        }
    }
}
