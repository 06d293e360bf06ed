//! Failure taxonomy of the remote translation tiers.

use thiserror::Error;

/// Why a remote tier could not supply a translated batch.
///
/// None of these ever reach the caller of `resolve`; they are logged and
/// the resolver moves on to the next tier.
#[derive(Debug, Error)]
pub enum TierError {
    /// The tier has no credential or endpoint configured.
    #[error("tier is not configured: {0}")]
    NotConfigured(&'static str),

    /// Request could not be sent or the body could not be read.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status.
    #[error("endpoint responded with status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// Body was not JSON or matched no known envelope shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Envelope carried a different number of translations than submitted.
    #[error("response has {got} translations for {expected} inputs")]
    Misaligned {
        /// Number of submitted texts.
        expected: usize,
        /// Number of translations received.
        got: usize,
    },
}

impl TierError {
    /// Whether the error comes from configuration rather than the network.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::NotConfigured(_))
    }
}
