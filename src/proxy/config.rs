//! Proxy settings read from the process environment.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;
use zeroize::Zeroizing;

use crate::resolver::DEFAULT_DIRECT_API_URL;

/// Environment variable holding the upstream credential.
pub const API_KEY_ENV: &str = "GOOGLE_TRANSLATE_API_KEY";
/// Environment variable selecting the listen port.
pub const PORT_ENV: &str = "PORT";
/// Environment variable selecting the listen address.
pub const HOST_ENV: &str = "HOST";
/// Environment variable overriding the upstream endpoint.
pub const UPSTREAM_URL_ENV: &str = "TRANSLATE_UPSTREAM_URL";
/// Listen port when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 3000;

/// Invalid proxy environment.
#[derive(Debug, Error)]
pub enum ProxyConfigError {
    /// `PORT` is not a port number.
    #[error("PORT must be a valid port number, got {0:?}")]
    InvalidPort(String),
    /// `HOST` is not an IP address.
    #[error("HOST must be a valid IP address, got {0:?}")]
    InvalidHost(String),
}

/// Listen address, credential and upstream endpoint of the proxy.
#[derive(Clone)]
pub struct ProxyConfig {
    /// Listen address.
    pub host: IpAddr,
    /// Listen port.
    pub port: u16,
    /// Upstream credential; `None` makes every translate request fail with 500.
    pub api_key: Option<Zeroizing<String>>,
    /// Upstream translate endpoint (the key is appended as `?key=`).
    pub upstream_url: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            api_key: None,
            upstream_url: DEFAULT_DIRECT_API_URL.to_string(),
        }
    }
}

impl fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("upstream_url", &self.upstream_url)
            .finish()
    }
}

impl ProxyConfig {
    /// What: Read the proxy configuration from the process environment.
    ///
    /// # Errors
    /// - Returns `Err` when `PORT` or `HOST` is set to an unparsable value
    pub fn from_env() -> Result<Self, ProxyConfigError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// What: Build the configuration from an environment accessor.
    ///
    /// Inputs:
    /// - `lookup`: Returns the value of a variable, `None` when unset
    ///
    /// Output:
    /// - Configuration with defaults for unset or blank variables
    ///
    /// # Errors
    /// - Returns `Err` when `PORT` or `HOST` is set to an unparsable value
    ///
    /// Details:
    /// - A missing credential is not an error here; requests report it instead.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ProxyConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| lookup(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut cfg = Self::default();
        if let Some(p) = get(PORT_ENV) {
            cfg.port = p.parse().map_err(|_| ProxyConfigError::InvalidPort(p))?;
        }
        if let Some(h) = get(HOST_ENV) {
            cfg.host = h.parse().map_err(|_| ProxyConfigError::InvalidHost(h))?;
        }
        if let Some(url) = get(UPSTREAM_URL_ENV) {
            cfg.upstream_url = url;
        }
        cfg.api_key = get(API_KEY_ENV).map(Zeroizing::new);
        Ok(cfg)
    }

    /// Socket address to bind.
    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
