//! Integration tests for the translate proxy service.
//!
//! Tests cover:
//! - Request validation (400) and missing credential (500)
//! - Relay of upstream failures and successes
//! - Forwarded payload shape and credential injection
//! - Health endpoint and CORS headers

#![cfg(test)]

use std::sync::Arc;

use axum::http::StatusCode;
use inplace_translator::proxy::{
    INTERNAL_ERROR, MISSING_FIELDS_ERROR, MISSING_KEY_ERROR, ProxyState, router,
};
use serde_json::{Value, json};
use zeroize::Zeroizing;

use crate::mock;

/// What: Start the proxy with an optional key in front of `upstream`.
///
/// Output:
/// - Base URL of the running proxy
async fn start_proxy(key: Option<&str>, upstream: &str) -> String {
    let state = ProxyState::new(
        reqwest::Client::new(),
        key.map(|k| Zeroizing::new(k.to_string())),
        upstream,
    );
    let addr = mock::spawn(router(Arc::new(state))).await;
    format!("http://{addr}")
}

/// POST a raw body to `/translate`, returning status and parsed JSON.
async fn post_raw(base: &str, body: &str) -> (u16, Value) {
    let resp = reqwest::Client::new()
        .post(format!("{base}/translate"))
        .header("content-type", "application/json")
        .body(body.to_string())
        .send()
        .await
        .expect("proxy reachable");
    let status = resp.status().as_u16();
    let text = resp.text().await.expect("body");
    (status, serde_json::from_str(&text).expect("json body"))
}

/// POST a JSON value to `/translate`.
async fn post(base: &str, body: &Value) -> (u16, Value) {
    post_raw(base, &body.to_string()).await
}

#[tokio::test]
/// What: Missing or empty `q`/`target` yields 400 even without a key.
///
/// Inputs:
/// - Bodies lacking `q`, lacking `target`, with empty strings, and invalid JSON.
///
/// Output:
/// - 400 with the fixed error message; upstream never called.
async fn rejects_missing_fields() {
    let (upstream, log) = mock::translator("/v2", &[], true).await;
    for key in [None, Some("server-key")] {
        let base = start_proxy(key, &upstream).await;
        for body in [
            json!({"target": "en"}),
            json!({"q": ["Hallo"]}),
            json!({"q": "", "target": "en"}),
            json!({"q": "Hallo", "target": ""}),
            json!({"q": null, "target": "en"}),
        ] {
            let (status, reply) = post(&base, &body).await;
            assert_eq!(status, 400, "body {body}");
            assert_eq!(reply, json!({ "error": MISSING_FIELDS_ERROR }));
        }
        let (status, _) = post_raw(&base, "{not json").await;
        assert_eq!(status, 400);
    }
    assert_eq!(mock::count(&log), 0);
}

#[tokio::test]
/// What: A valid request without a configured key yields 500.
async fn missing_key_is_server_error() {
    let (upstream, log) = mock::translator("/v2", &[], true).await;
    let base = start_proxy(None, &upstream).await;
    let (status, reply) = post(&base, &json!({"q": ["Hallo"], "target": "en"})).await;
    assert_eq!(status, 500);
    assert_eq!(reply, json!({ "error": MISSING_KEY_ERROR }));
    assert_eq!(mock::count(&log), 0);
}

#[tokio::test]
/// What: Successful requests are forwarded with the key and relayed unchanged.
///
/// Inputs:
/// - `q` as a list without `format`, then `q` as a string with `format: html`.
///
/// Output:
/// - Upstream body relayed; forwarded payload carries `format` (default `text`) and the key.
async fn forwards_and_relays_success() {
    let (upstream, log) =
        mock::translator("/v2", &[("Hallo", "Hello"), ("Welt", "World")], true).await;
    let base = start_proxy(Some("server-key"), &upstream).await;

    let (status, reply) = post(&base, &json!({"q": ["Hallo", "Welt"], "target": "en"})).await;
    assert_eq!(status, 200);
    assert_eq!(
        reply,
        json!({"data": {"translations": [
            {"translatedText": "Hello"},
            {"translatedText": "World"}
        ]}})
    );

    let (status, _) = post(
        &base,
        &json!({"q": "Hallo", "target": "en", "format": "html"}),
    )
    .await;
    assert_eq!(status, 200);

    let reqs = mock::requests(&log);
    assert_eq!(reqs.len(), 2);
    assert_eq!(reqs[0].query.get("key").map(String::as_str), Some("server-key"));
    assert_eq!(
        reqs[0].body,
        json!({"q": ["Hallo", "Welt"], "target": "en", "format": "text"})
    );
    assert_eq!(
        reqs[1].body,
        json!({"q": "Hallo", "target": "en", "format": "html"})
    );
}

#[tokio::test]
/// What: Upstream failures are relayed with their status and body.
///
/// Inputs:
/// - Upstream answering 403 with a JSON error, then 503 with plain text.
///
/// Output:
/// - 403 with the JSON body unchanged; 503 with the text wrapped as `{"error": ...}`.
async fn relays_upstream_failures() {
    let upstream_body = json!({"error": {"code": 403, "message": "API key not valid"}});
    let (upstream, _) = mock::fixed(
        "/v2",
        StatusCode::FORBIDDEN,
        &upstream_body.to_string(),
    )
    .await;
    let base = start_proxy(Some("bad-key"), &upstream).await;
    let (status, reply) = post(&base, &json!({"q": ["Hallo"], "target": "en"})).await;
    assert_eq!(status, 403);
    assert_eq!(reply, upstream_body);

    let (upstream, _) =
        mock::fixed("/v2", StatusCode::SERVICE_UNAVAILABLE, "try again later").await;
    let base = start_proxy(Some("server-key"), &upstream).await;
    let (status, reply) = post(&base, &json!({"q": ["Hallo"], "target": "en"})).await;
    assert_eq!(status, 503);
    assert_eq!(reply, json!({"error": "try again later"}));
}

#[tokio::test]
/// What: An unreachable upstream becomes a generic 500.
async fn unreachable_upstream_is_internal_error() {
    let closed = mock::closed_addr().await;
    let base = start_proxy(Some("server-key"), &format!("http://{closed}/v2")).await;
    let (status, reply) = post(&base, &json!({"q": ["Hallo"], "target": "en"})).await;
    assert_eq!(status, 500);
    assert_eq!(reply, json!({ "error": INTERNAL_ERROR }));
}

#[tokio::test]
/// What: `/health` answers OK and CORS allows any origin.
async fn health_and_cors() {
    let (upstream, _) = mock::translator("/v2", &[], true).await;
    let base = start_proxy(None, &upstream).await;
    let resp = reqwest::Client::new()
        .get(format!("{base}/health"))
        .header("origin", "https://flowtech.example")
        .send()
        .await
        .expect("health");
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    assert_eq!(resp.text().await.expect("body"), "OK");
}
