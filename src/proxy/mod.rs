//! Credential-hiding translate relay.
//!
//! # Endpoints
//!
//! - `POST /translate`: body `{ q: string | [string], target, format? }`.
//!   Rejects missing or empty `q`/`target` with 400, answers 500 when no
//!   upstream credential is configured, otherwise forwards
//!   `{ q, target, format }` (format defaulting to `"text"`) to the upstream
//!   endpoint with the credential appended as `?key=`. Upstream failures are
//!   relayed with their status and body; success bodies are relayed as-is.
//! - `GET /health`: `OK`.
//!
//! The relay is stateless: no batching, caching or retries.

mod config;

pub use config::{
    API_KEY_ENV, DEFAULT_PORT, HOST_ENV, PORT_ENV, ProxyConfig, ProxyConfigError,
    UPSTREAM_URL_ENV,
};

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use zeroize::Zeroizing;

use crate::resolver::wire::DEFAULT_FORMAT;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Error body for requests without `q` or `target`.
pub const MISSING_FIELDS_ERROR: &str = "Missing q (array|string) or target";
/// Error body when the credential is not configured.
pub const MISSING_KEY_ERROR: &str = "Server missing API key (set GOOGLE_TRANSLATE_API_KEY)";
/// Error body for unexpected failures.
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Upstream request timeout.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared handler state.
pub struct ProxyState {
    /// HTTP client for upstream calls.
    client: reqwest::Client,
    /// Upstream credential.
    api_key: Option<Zeroizing<String>>,
    /// Upstream endpoint without the key.
    upstream_url: String,
}

impl ProxyState {
    /// What: Build handler state from the proxy configuration.
    ///
    /// # Errors
    /// - Returns `Err` when the HTTP client cannot be constructed
    pub fn from_config(config: &ProxyConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()?;
        Ok(Self::new(
            client,
            config.api_key.clone(),
            &config.upstream_url,
        ))
    }

    /// State with an explicit client.
    #[must_use]
    pub fn new(
        client: reqwest::Client,
        api_key: Option<Zeroizing<String>>,
        upstream_url: &str,
    ) -> Self {
        Self {
            client,
            api_key,
            upstream_url: upstream_url.to_string(),
        }
    }
}

/// What: Build the proxy router.
///
/// Inputs:
/// - `state`: Shared handler state
///
/// Output:
/// - Router with `/translate`, `/health` and a permissive CORS layer
pub fn router(state: Arc<ProxyState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    Router::new()
        .route("/translate", post(translate))
        .route("/health", get(health_check))
        .layer(cors)
        .with_state(state)
}

/// What: Bind and run the proxy until the process stops.
///
/// Inputs:
/// - `config`: Listen address, credential and upstream endpoint
///
/// # Errors
/// - Returns `Err` when binding fails or the server stops with an error
pub async fn serve(config: ProxyConfig) -> Result<()> {
    if config.api_key.is_none() {
        tracing::warn!(
            "{API_KEY_ENV} is not set; translate requests will fail with 500 until a key is provided"
        );
    }
    let state = Arc::new(ProxyState::from_config(&config)?);
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, upstream = %config.upstream_url, "translate proxy listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

/// JSON error body.
fn error_body(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message })))
}

/// JavaScript-style truthiness of a JSON value.
fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// What: Handle `POST /translate`.
///
/// Output:
/// - Status and JSON body per the relay contract in the module docs
async fn translate(
    State(state): State<Arc<ProxyState>>,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let field = |name: &str| request.get(name).filter(|v| is_truthy(v)).cloned();
    let (Some(q), Some(target)) = (field("q"), field("target")) else {
        tracing::debug!("rejecting translate request without q or target");
        return error_body(StatusCode::BAD_REQUEST, MISSING_FIELDS_ERROR);
    };
    let Some(api_key) = state.api_key.as_ref() else {
        tracing::warn!("translate request refused: upstream credential not configured");
        return error_body(StatusCode::INTERNAL_SERVER_ERROR, MISSING_KEY_ERROR);
    };
    let format = field("format").unwrap_or_else(|| Value::from(DEFAULT_FORMAT));
    let payload = json!({ "q": q, "target": target, "format": format });

    match forward(&state, api_key, &payload).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!(error = %e, "translate proxy error");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
        }
    }
}

/// What: Send the payload upstream and shape the reply.
///
/// # Errors
/// - Returns `Err` on network failures, an invalid upstream URL, or a
///   successful response that is not JSON
async fn forward(
    state: &ProxyState,
    api_key: &str,
    payload: &Value,
) -> Result<(StatusCode, Json<Value>)> {
    let url = reqwest::Url::parse_with_params(&state.upstream_url, &[("key", api_key)])?;
    let count = payload
        .get("q")
        .and_then(Value::as_array)
        .map_or(1, Vec::len);
    tracing::debug!(count, "forwarding translate request upstream");
    let resp = state.client.post(url).json(payload).send().await?;
    let status = StatusCode::from_u16(resp.status().as_u16())?;
    let text = resp.text().await?;
    if status.is_success() {
        let data: Value = serde_json::from_str(&text)?;
        tracing::info!(count, "translate request relayed");
        return Ok((StatusCode::OK, Json(data)));
    }
    tracing::warn!(status = status.as_u16(), "upstream translate API error");
    let data = serde_json::from_str::<Value>(&text).unwrap_or_else(|_| json!({ "error": text }));
    Ok((status, Json(data)))
}
