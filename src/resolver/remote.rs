//! Remote translation tiers: the credential-hiding proxy and the direct API.

use std::fmt;

use serde_json::Value;
use zeroize::Zeroizing;

use super::error::TierError;
use super::wire::{TranslateRequest, any_translations, nested_translations};

/// Default direct translate endpoint (Google Cloud Translation v2).
pub const DEFAULT_DIRECT_API_URL: &str = "https://translation.googleapis.com/language/translate/v2";

/// Maximum number of body characters kept in a [`TierError::Status`].
const ERROR_BODY_LIMIT: usize = 512;

/// Which remote strategy produced a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteKind {
    /// Relay configured via `proxy_url`.
    Proxy,
    /// Direct call to the provider with a client-side credential.
    DirectApi,
}

impl fmt::Display for RemoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Proxy => "proxy",
            Self::DirectApi => "direct-api",
        })
    }
}

/// One remote strategy in the fallback chain.
#[derive(Clone)]
pub enum RemoteTier {
    /// `POST {url}` with the batched request; accepts nested or flat envelopes.
    Proxy {
        /// Absolute proxy endpoint.
        url: String,
    },
    /// `POST {endpoint}?key=...`; accepts the nested envelope only.
    DirectApi {
        /// Provider endpoint.
        endpoint: String,
        /// Client-side credential; `None` means the tier is skipped.
        api_key: Option<Zeroizing<String>>,
    },
}

impl fmt::Debug for RemoteTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proxy { url } => f.debug_struct("Proxy").field("url", url).finish(),
            Self::DirectApi { endpoint, api_key } => f
                .debug_struct("DirectApi")
                .field("endpoint", endpoint)
                .field("api_key", &api_key.as_ref().map(|_| "<redacted>"))
                .finish(),
        }
    }
}

impl RemoteTier {
    /// Kind of this tier.
    #[must_use]
    pub const fn kind(&self) -> RemoteKind {
        match self {
            Self::Proxy { .. } => RemoteKind::Proxy,
            Self::DirectApi { .. } => RemoteKind::DirectApi,
        }
    }

    /// What: Translate one batch through this tier.
    ///
    /// Inputs:
    /// - `client`: Shared HTTP client
    /// - `texts`: Pristine texts in unit order
    /// - `target`: Target language code
    ///
    /// Output:
    /// - `Ok(translations)` aligned 1:1 with `texts`; `Err(TierError)` otherwise
    ///
    /// # Errors
    /// - `NotConfigured` when the direct tier has no credential
    /// - `Network` when the request cannot be sent or read
    /// - `Status` on a non-success response
    /// - `Malformed`/`Misaligned` when the body cannot be used
    pub async fn translate(
        &self,
        client: &reqwest::Client,
        texts: &[String],
        target: &str,
    ) -> Result<Vec<String>, TierError> {
        let request = TranslateRequest::batch(texts, target);
        let (url, nested_only) = match self {
            Self::Proxy { url } => (
                reqwest::Url::parse(url)
                    .map_err(|_| TierError::NotConfigured("proxy url is not an absolute URL"))?,
                false,
            ),
            Self::DirectApi { endpoint, api_key } => {
                let Some(key) = api_key.as_ref().filter(|k| !k.trim().is_empty()) else {
                    return Err(TierError::NotConfigured("no client api key"));
                };
                (
                    reqwest::Url::parse_with_params(endpoint, &[("key", key.as_str())]).map_err(
                        |_| TierError::NotConfigured("direct api endpoint is not a valid URL"),
                    )?,
                    true,
                )
            }
        };

        let response = client.post(url).json(&request).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(TierError::Status {
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        let json: Value =
            serde_json::from_str(&body).map_err(|e| TierError::Malformed(e.to_string()))?;
        let translations = if nested_only {
            nested_translations(&json)
        } else {
            any_translations(&json)
        }
        .ok_or_else(|| TierError::Malformed("no translations in response".to_string()))?;

        if translations.len() != texts.len() {
            return Err(TierError::Misaligned {
                expected: texts.len(),
                got: translations.len(),
            });
        }
        Ok(translations)
    }
}
