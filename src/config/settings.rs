use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use super::parsing::split_assignment;
use super::paths::resolve_settings_path;
use crate::resolver::DEFAULT_DIRECT_API_URL;

/// Default proxy endpoint (local relay on the default port).
pub const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:3000/translate";
/// Environment variable overriding `proxy_url`.
pub const PROXY_URL_ENV: &str = "TRANSLATE_PROXY_URL";

/// Client-side translation settings.
#[derive(Clone)]
pub struct ClientSettings {
    /// Language the page is authored in.
    pub source_language: String,
    /// The other language of the toggle.
    pub target_language: String,
    /// Proxy endpoint.
    pub proxy_url: String,
    /// Inline credential for the direct tier. Visible to anyone who can read the config.
    pub api_key: Option<Zeroizing<String>>,
    /// Direct tier endpoint.
    pub direct_api_url: String,
    /// Optional YAML fallback table replacing the built-in one.
    pub fallback_table: Option<PathBuf>,
    /// Per-request timeout of remote tiers.
    pub request_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            source_language: "de".to_string(),
            target_language: "en".to_string(),
            proxy_url: DEFAULT_PROXY_URL.to_string(),
            api_key: None,
            direct_api_url: DEFAULT_DIRECT_API_URL.to_string(),
            fallback_table: None,
            request_timeout_secs: 10,
        }
    }
}

impl fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSettings")
            .field("source_language", &self.source_language)
            .field("target_language", &self.target_language)
            .field("proxy_url", &self.proxy_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("direct_api_url", &self.direct_api_url)
            .field("fallback_table", &self.fallback_table)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// What: Validate a language code.
///
/// Inputs:
/// - `code`: Language code to validate
///
/// Output:
/// - `true` if format looks valid, `false` otherwise
///
/// Details:
/// - Accepts `language[-region]` shapes such as `en`, `de-CH`, `zh-Hans`
/// - Rejects empty codes, spaces, special characters and dangling hyphens
#[must_use]
pub fn is_valid_language_code(code: &str) -> bool {
    if code.is_empty() || code.len() > 20 {
        return false;
    }
    code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !code.starts_with('-')
        && !code.ends_with('-')
        && !code.contains("--")
}

/// What: Parse settings content into `settings`.
///
/// Inputs:
/// - `content`: Content of the settings file
/// - `base_dir`: Directory relative `fallback_table` paths are resolved against
/// - `settings`: Settings to update in place
///
/// Details:
/// - Unknown keys are ignored; invalid values are logged and leave the default.
pub fn parse_settings(content: &str, base_dir: Option<&Path>, settings: &mut ClientSettings) {
    for line in content.lines() {
        let Some((key, val)) = split_assignment(line) else {
            continue;
        };
        match key.as_str() {
            "source_language" | "source_lang" | "page_language" => {
                if is_valid_language_code(val) {
                    settings.source_language = val.to_string();
                } else {
                    tracing::warn!(value = val, "invalid source_language in settings");
                }
            }
            "target_language" | "target_lang" => {
                if is_valid_language_code(val) {
                    settings.target_language = val.to_string();
                } else {
                    tracing::warn!(value = val, "invalid target_language in settings");
                }
            }
            "proxy_url" | "translate_proxy_url" => {
                if !val.is_empty() {
                    settings.proxy_url = val.to_string();
                }
            }
            "api_key" | "google_translate_api_key" => {
                settings.api_key = (!val.is_empty()).then(|| Zeroizing::new(val.to_string()));
            }
            "direct_api_url" | "api_url" => {
                if !val.is_empty() {
                    settings.direct_api_url = val.to_string();
                }
            }
            "fallback_table" | "fallback_file" => {
                settings.fallback_table = (!val.is_empty()).then(|| {
                    let p = PathBuf::from(val);
                    match base_dir {
                        Some(dir) if p.is_relative() => dir.join(p),
                        _ => p,
                    }
                });
            }
            "request_timeout_secs" | "timeout_secs" => match val.parse::<u64>() {
                Ok(v) if v > 0 => settings.request_timeout_secs = v,
                _ => tracing::warn!(value = val, "invalid request_timeout_secs in settings"),
            },
            _ => {}
        }
    }
}

/// What: Apply environment overrides.
///
/// Inputs:
/// - `settings`: Settings to update
/// - `lookup`: Environment accessor (`std::env::var` in production)
pub fn apply_env_overrides<F>(settings: &mut ClientSettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(PROXY_URL_ENV).filter(|u| !u.trim().is_empty()) {
        settings.proxy_url = url.trim().to_string();
    }
}

/// What: Load client settings.
///
/// Inputs:
/// - `explicit`: Settings file given on the command line, if any
///
/// Output:
/// - Settings from the file (or defaults when missing/unreadable) plus environment overrides
pub fn load_settings(explicit: Option<&Path>) -> ClientSettings {
    let mut out = ClientSettings::default();
    let path = explicit.map(Path::to_path_buf).or_else(resolve_settings_path);
    if let Some(p) = path {
        match fs::read_to_string(&p) {
            Ok(content) => {
                parse_settings(&content, p.parent(), &mut out);
                tracing::info!(path = %p.display(), "loaded settings");
            }
            Err(e) => {
                tracing::warn!(path = %p.display(), error = %e, "failed to read settings; using defaults");
            }
        }
    }
    apply_env_overrides(&mut out, |k| std::env::var(k).ok());
    out
}
