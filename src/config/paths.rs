//! Config, log and preference file locations.
//!
//! `$HOME/.config/inplace-translator` is preferred, `$XDG_CONFIG_HOME/inplace-translator`
//! is the alternative, and the working directory is the last resort.

use std::env;
use std::path::{Path, PathBuf};

/// Directory name under the config base.
const APP_DIR: &str = "inplace-translator";

/// Candidate config directories in priority order.
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(home) = env::var("HOME") {
        dirs.push(Path::new(&home).join(".config").join(APP_DIR));
    }
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME")
        && !xdg.trim().is_empty()
    {
        dirs.push(Path::new(&xdg).join(APP_DIR));
    }
    dirs
}

/// What: Find an existing settings file.
///
/// Output:
/// - First `settings.conf` found in the candidate directories, `None` when there is none
pub fn resolve_settings_path() -> Option<PathBuf> {
    candidate_dirs()
        .into_iter()
        .map(|dir| dir.join("settings.conf"))
        .find(|p| p.is_file())
}

/// Config directory for the translator (ensured to exist)
pub fn config_dir() -> PathBuf {
    candidate_dirs()
        .into_iter()
        .find(|dir| std::fs::create_dir_all(dir).is_ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Logs directory under config (ensured to exist)
pub fn logs_dir() -> PathBuf {
    let dir = config_dir().join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Preference file under config.
pub fn preferences_path() -> PathBuf {
    config_dir().join("preferences.json")
}
