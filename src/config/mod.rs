//! Client configuration: `settings.conf` parsing, XDG paths and environment overrides.

mod parsing;
pub mod paths;
mod settings;

pub use paths::{config_dir, logs_dir, preferences_path, resolve_settings_path};
pub use settings::{
    ClientSettings, DEFAULT_PROXY_URL, PROXY_URL_ENV, apply_env_overrides, is_valid_language_code,
    load_settings, parse_settings,
};

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

#[cfg(test)]
/// What: Provide a shared mutex to serialize tests that mutate process environment variables.
///
/// Output:
/// - Global `Mutex<()>` guarding `HOME`/`XDG_*` mutations in tests
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}
