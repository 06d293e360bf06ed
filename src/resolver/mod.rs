//! Translation resolver with a tiered fallback chain.
//!
//! # Overview
//!
//! [`Resolver::resolve`] turns a unit inventory into translated strings,
//! positionally aligned with the units. Per call it picks exactly one tier
//! for the whole batch:
//!
//! 1. **Source**: the target is the source language, so the stored
//!    originals are returned unchanged (restoration).
//! 2. **Remote tiers**, in configured order (normally proxy, then direct
//!    API). Each gets one batched request holding every pristine text.
//!    The first tier that returns a well-formed, aligned response wins.
//! 3. **Fallback table**: exact lookup of each trimmed pristine text.
//! 4. **Pass-through**: the pristine text itself.
//!
//! Tiers 3 and 4 are applied together per unit. Remote failures are logged
//! and never returned to the caller, and a batch is never assembled from
//! more than one remote tier.

mod error;
mod fallback;
mod remote;
pub mod wire;

pub use error::TierError;
pub use fallback::QuickFallbackTable;
pub use remote::{DEFAULT_DIRECT_API_URL, RemoteKind, RemoteTier};

use std::fmt;
use std::time::Duration;

use crate::config::ClientSettings;
use crate::inventory::{OriginalStore, TranslatableUnit};

/// Tier that produced a [`Resolution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolvedTier {
    /// Target equals the source language; originals were returned.
    Source,
    /// A remote tier translated the batch.
    Remote(RemoteKind),
    /// No remote tier succeeded; at least one fallback table entry matched.
    FallbackTable,
    /// No remote tier succeeded and nothing matched; originals were returned.
    PassThrough,
}

impl fmt::Display for ResolvedTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Remote(kind) => fmt::Display::fmt(kind, f),
            Self::FallbackTable => f.write_str("fallback-table"),
            Self::PassThrough => f.write_str("pass-through"),
        }
    }
}

/// Resolved texts plus the tier that supplied them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// One string per unit, in unit order.
    pub texts: Vec<String>,
    /// Tier that served the batch.
    pub tier: ResolvedTier,
}

/// Ordered chain of translation strategies.
#[derive(Debug, Clone)]
pub struct Resolver {
    /// Language the page is authored in.
    source_language: String,
    /// Remote tiers, tried in order.
    tiers: Vec<RemoteTier>,
    /// Static table for the last-resort tier.
    fallback: QuickFallbackTable,
    /// Shared HTTP client for every remote tier.
    client: reqwest::Client,
}

impl Resolver {
    /// What: Create a resolver with no remote tiers and the built-in fallback table.
    ///
    /// Inputs:
    /// - `source_language`: Language code of the pristine page
    ///
    /// Output:
    /// - Resolver that only restores originals or applies the fallback table
    #[must_use]
    pub fn new(source_language: &str) -> Self {
        Self {
            source_language: source_language.trim().to_string(),
            tiers: Vec::new(),
            fallback: QuickFallbackTable::builtin(),
            client: reqwest::Client::new(),
        }
    }

    /// Append a remote tier to the chain.
    #[must_use]
    pub fn with_tier(mut self, tier: RemoteTier) -> Self {
        self.tiers.push(tier);
        self
    }

    /// Replace the static fallback table.
    #[must_use]
    pub fn with_fallback(mut self, table: QuickFallbackTable) -> Self {
        self.fallback = table;
        self
    }

    /// Replace the HTTP client (e.g. to change timeouts).
    #[must_use]
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// What: Build the standard chain from client settings.
    ///
    /// Inputs:
    /// - `settings`: Client configuration
    ///
    /// Output:
    /// - Resolver with proxy tier, direct API tier (skipped at runtime when no
    ///   key is set) and the configured or built-in fallback table
    ///
    /// Details:
    /// - A fallback table file that fails to load is logged and the built-in table is used.
    #[must_use]
    pub fn from_settings(settings: &ClientSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        let fallback = settings.fallback_table.as_ref().map_or_else(
            QuickFallbackTable::builtin,
            |path| {
                QuickFallbackTable::load(path).unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "using built-in fallback table");
                    QuickFallbackTable::builtin()
                })
            },
        );
        Self::new(&settings.source_language)
            .with_client(client)
            .with_fallback(fallback)
            .with_tier(RemoteTier::Proxy {
                url: settings.proxy_url.clone(),
            })
            .with_tier(RemoteTier::DirectApi {
                endpoint: settings.direct_api_url.clone(),
                api_key: settings.api_key.clone(),
            })
    }

    /// Language code of the pristine page.
    #[must_use]
    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    /// Whether `language` names the source language.
    #[must_use]
    pub fn is_source(&self, language: &str) -> bool {
        self.source_language.eq_ignore_ascii_case(language.trim())
    }

    /// What: Resolve translated strings for a unit inventory.
    ///
    /// Inputs:
    /// - `units`: Units from the latest collection
    /// - `originals`: Original store holding pristine text per key
    /// - `target`: Target language code
    ///
    /// Output:
    /// - Strings aligned 1:1 with `units`; never fails
    pub async fn resolve(
        &self,
        units: &[TranslatableUnit],
        originals: &OriginalStore,
        target: &str,
    ) -> Vec<String> {
        self.resolve_detailed(units, originals, target).await.texts
    }

    /// What: Resolve a batch and report which tier served it.
    ///
    /// Inputs:
    /// - `units`: Units from the latest collection
    /// - `originals`: Original store holding pristine text per key
    /// - `target`: Target language code
    ///
    /// Output:
    /// - [`Resolution`] with aligned texts and the serving tier
    ///
    /// Details:
    /// - Pristine text comes from `originals`, never from `current_text`,
    ///   so already translated pages are not translated twice.
    /// - Each remote tier is attempted at most once; no retries.
    pub async fn resolve_detailed(
        &self,
        units: &[TranslatableUnit],
        originals: &OriginalStore,
        target: &str,
    ) -> Resolution {
        let pristine = originals.pristine_texts(units);
        if self.is_source(target) {
            return Resolution {
                texts: pristine,
                tier: ResolvedTier::Source,
            };
        }
        if pristine.is_empty() {
            return Resolution {
                texts: pristine,
                tier: ResolvedTier::PassThrough,
            };
        }

        for tier in &self.tiers {
            match tier.translate(&self.client, &pristine, target).await {
                Ok(texts) => {
                    tracing::info!(tier = %tier.kind(), count = texts.len(), lang = target, "batch translated");
                    return Resolution {
                        texts,
                        tier: ResolvedTier::Remote(tier.kind()),
                    };
                }
                Err(TierError::Network(e)) if tier.kind() == RemoteKind::Proxy => {
                    tracing::info!(error = %e, "translate proxy unavailable, trying next tier");
                }
                Err(e) if e.is_configuration() => {
                    tracing::debug!(tier = %tier.kind(), reason = %e, "tier skipped");
                }
                Err(e) => {
                    tracing::warn!(tier = %tier.kind(), error = %e, "translation tier failed");
                }
            }
        }

        tracing::warn!(
            lang = target,
            count = pristine.len(),
            "remote translation unavailable, using fallback table"
        );
        self.fallback_only(pristine, target)
    }

    /// What: Apply the static table / pass-through tier to a whole batch.
    ///
    /// Inputs:
    /// - `pristine`: Pristine texts in unit order
    /// - `target`: Target language code
    ///
    /// Output:
    /// - Table translation where an exact match exists, the pristine text otherwise
    #[must_use]
    pub fn fallback_only(&self, pristine: Vec<String>, target: &str) -> Resolution {
        let mut hits = 0usize;
        let texts: Vec<String> = pristine
            .into_iter()
            .map(|text| {
                if let Some(hit) = self.fallback.lookup(target, &text) {
                    hits += 1;
                    hit.to_string()
                } else {
                    text
                }
            })
            .collect();
        tracing::debug!(hits, total = texts.len(), "fallback table applied");
        Resolution {
            texts,
            tier: if hits > 0 {
                ResolvedTier::FallbackTable
            } else {
                ResolvedTier::PassThrough
            },
        }
    }
}
