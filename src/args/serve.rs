//! Proxy command.

use std::net::IpAddr;

use inplace_translator::proxy::{self, ProxyConfig};

use crate::args::utils::Result;

/// What: Run the translate proxy.
///
/// Inputs:
/// - `host`: Listen address overriding `HOST`.
/// - `port`: Listen port overriding `PORT`.
///
/// # Errors
/// - Returns `Err` for an invalid environment, a failed bind, or a server error.
pub async fn handle_serve(host: Option<IpAddr>, port: Option<u16>) -> Result<()> {
    let mut config = ProxyConfig::from_env()?;
    if let Some(h) = host {
        config.host = h;
    }
    if let Some(p) = port {
        config.port = p;
    }
    tracing::info!(?config, "serve requested from CLI");
    proxy::serve(config).await
}
