//! JSON shapes shared by the resolver and the proxy service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default `format` value of a translate request.
pub const DEFAULT_FORMAT: &str = "text";

/// `q` may be a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Query {
    /// One text.
    One(String),
    /// Batch of texts, translated in order.
    Many(Vec<String>),
}

/// Body of `POST /translate` and of the upstream translate call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateRequest {
    /// Text(s) to translate.
    pub q: Query,
    /// Target language code.
    pub target: String,
    /// Content format, `"text"` unless stated otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl TranslateRequest {
    /// What: Build a batched text request.
    ///
    /// Inputs:
    /// - `texts`: Texts in unit order
    /// - `target`: Target language code
    ///
    /// Output:
    /// - Request with `q` as a list and `format = "text"`
    #[must_use]
    pub fn batch(texts: &[String], target: &str) -> Self {
        Self {
            q: Query::Many(texts.to_vec()),
            target: target.to_string(),
            format: Some(DEFAULT_FORMAT.to_string()),
        }
    }
}

/// What: Extract translations from the nested upstream envelope.
///
/// Inputs:
/// - `body`: Parsed JSON body
///
/// Output:
/// - `Some(texts)` for `{"data": {"translations": [{"translatedText": ..}]}}`; `None` otherwise
///
/// Details:
/// - An entry without a string `translatedText` invalidates the whole envelope.
#[must_use]
pub fn nested_translations(body: &Value) -> Option<Vec<String>> {
    body.get("data")?
        .get("translations")?
        .as_array()?
        .iter()
        .map(|t| {
            t.get("translatedText")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .collect()
}

/// What: Extract translations from a flat `{"translations": ["..", ..]}` envelope.
#[must_use]
pub fn flat_translations(body: &Value) -> Option<Vec<String>> {
    body.get("translations")?
        .as_array()?
        .iter()
        .map(|t| t.as_str().map(str::to_string))
        .collect()
}

/// Nested envelope first, then the flat list.
#[must_use]
pub fn any_translations(body: &Value) -> Option<Vec<String>> {
    nested_translations(body).or_else(|| flat_translations(body))
}
