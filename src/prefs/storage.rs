//! Key-value storage backends for persisted preferences.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure of a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// File could not be read or written.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Stored data is not a JSON object of strings.
    #[error("storage data is invalid: {0}")]
    Json(#[from] serde_json::Error),
    /// Backend refuses access (quota, disabled storage, ...).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// String key-value storage.
pub trait KeyValueStorage {
    /// What: Read a value.
    ///
    /// # Errors
    /// - Returns `Err` when the backend cannot be read
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// What: Write a value.
    ///
    /// # Errors
    /// - Returns `Err` when the backend cannot be written
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// JSON object on disk, one entry per key.
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Location of the JSON file.
    path: PathBuf,
}

impl FileStorage {
    /// Storage backed by `path` (created on first write).
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// What: Read the whole map.
    ///
    /// Output:
    /// - Empty map when the file does not exist
    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(s) if s.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(s) => Ok(serde_json::from_str(&s)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let s = serde_json::to_string_pretty(&map)?;
        tracing::debug!(
            path = %self.path.display(),
            bytes = s.len(),
            "[Persist] Writing preferences to disk"
        );
        fs::write(&self.path, s)?;
        Ok(())
    }
}

/// In-memory storage, optionally failing every access.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    /// Stored entries.
    entries: BTreeMap<String, String>,
    /// When set, every access fails with [`StorageError::Unavailable`].
    unavailable: bool,
}

impl MemoryStorage {
    /// Empty working storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage whose every access fails.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            entries: BTreeMap::new(),
            unavailable: true,
        }
    }

    /// Raw entry, bypassing the failure switch.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable("storage disabled".to_string()));
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable("quota exceeded".to_string()));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
