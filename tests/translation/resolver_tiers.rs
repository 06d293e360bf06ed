//! Integration tests for the resolver's tiered fallback chain.
//!
//! Tests cover:
//! - Proxy failure falling through to the static table
//! - Pass-through when every tier fails
//! - Flat and nested success envelopes
//! - Misaligned responses never producing a mixed batch
//! - Pristine text being sent even after the page was translated

#![cfg(test)]

use axum::http::StatusCode;
use inplace_translator::dom::Document;
use inplace_translator::inventory::{
    ExclusionRules, OriginalStore, TranslatableUnit, collect,
};
use inplace_translator::resolver::{RemoteKind, RemoteTier, ResolvedTier, Resolver};
use zeroize::Zeroizing;

use crate::mock;

/// What: Collect units from `html` with a fresh original store.
fn inventory(html: &str) -> (Vec<TranslatableUnit>, OriginalStore) {
    let doc = Document::parse(html);
    let mut store = OriginalStore::new();
    let units = collect(&doc, &ExclusionRules::default(), &mut store);
    (units, store)
}

/// Proxy tier at `url`.
fn proxy(url: &str) -> RemoteTier {
    RemoteTier::Proxy {
        url: url.to_string(),
    }
}

/// Direct tier at `url` with `key`.
fn direct(url: &str, key: Option<&str>) -> RemoteTier {
    RemoteTier::DirectApi {
        endpoint: url.to_string(),
        api_key: key.map(|k| Zeroizing::new(k.to_string())),
    }
}

#[tokio::test]
/// What: A proxy 500 with no direct key falls back to the static table.
///
/// Inputs:
/// - Inventory `["Startseite"]`, proxy answering 500, direct tier without key.
///
/// Output:
/// - `["Home"]` served by the fallback table; proxy called exactly once.
async fn proxy_error_uses_fallback_table() {
    let (url, log) = mock::fixed("/translate", StatusCode::INTERNAL_SERVER_ERROR, "{}").await;
    let (units, store) = inventory("<p>Startseite</p>");
    let resolver = Resolver::new("de")
        .with_tier(proxy(&url))
        .with_tier(direct("http://127.0.0.1:9/v2", None));
    let res = resolver.resolve_detailed(&units, &store, "en").await;
    assert_eq!(res.texts, vec!["Home".to_string()]);
    assert_eq!(res.tier, ResolvedTier::FallbackTable);
    assert_eq!(mock::count(&log), 1);
}

#[tokio::test]
/// What: Unknown text passes through when the proxy is down and the direct API fails.
///
/// Inputs:
/// - Inventory `["Zufälliger Text"]`, nothing listening on the proxy port,
///   direct tier answering 403.
///
/// Output:
/// - `["Zufälliger Text"]`, tier `PassThrough`.
async fn all_tiers_fail_pass_through() {
    let closed = mock::closed_addr().await;
    let (direct_url, direct_log) = mock::fixed(
        "/v2",
        StatusCode::FORBIDDEN,
        r#"{"error":{"code":403,"message":"denied"}}"#,
    )
    .await;
    let (units, store) = inventory("<p>Zufälliger Text</p>");
    let resolver = Resolver::new("de")
        .with_tier(proxy(&format!("http://{closed}/translate")))
        .with_tier(direct(&direct_url, Some("client-key")));
    let res = resolver.resolve_detailed(&units, &store, "en").await;
    assert_eq!(res.texts, vec!["Zufälliger Text".to_string()]);
    assert_eq!(res.tier, ResolvedTier::PassThrough);
    assert_eq!(mock::count(&direct_log), 1);
}

#[tokio::test]
/// What: The proxy tier sends one batched request and accepts the flat envelope.
///
/// Inputs:
/// - Two units, proxy answering `{"translations": [...]}`.
///
/// Output:
/// - Translations in unit order; request carries every text, the target and `format: text`.
async fn proxy_flat_envelope() {
    let (url, log) = mock::translator(
        "/translate",
        &[("Willkommen bei uns", "Welcome to us"), ("Kontakt", "Contact us")],
        false,
    )
    .await;
    let (units, store) = inventory("<h1>Willkommen bei uns</h1><p>Kontakt</p>");
    let resolver = Resolver::new("de").with_tier(proxy(&url));
    let res = resolver.resolve_detailed(&units, &store, "en").await;
    assert_eq!(res.tier, ResolvedTier::Remote(RemoteKind::Proxy));
    assert_eq!(
        res.texts,
        vec!["Welcome to us".to_string(), "Contact us".to_string()]
    );
    let reqs = mock::requests(&log);
    assert_eq!(reqs.len(), 1);
    assert_eq!(
        mock::submitted(&reqs[0]),
        vec!["Willkommen bei uns".to_string(), "Kontakt".to_string()]
    );
    assert_eq!(reqs[0].body["target"], "en");
    assert_eq!(reqs[0].body["format"], "text");
}

#[tokio::test]
/// What: The direct tier appends the key and reads the nested envelope.
///
/// Inputs:
/// - Proxy answering 502, direct tier with a key answering the nested shape.
///
/// Output:
/// - Translations from the direct tier; `key` query parameter carried.
async fn direct_tier_nested_envelope() {
    let (proxy_url, _) = mock::fixed("/translate", StatusCode::BAD_GATEWAY, "bad gateway").await;
    let (direct_url, log) =
        mock::translator("/v2", &[("Über uns", "About us")], true).await;
    let (units, store) = inventory("<p>Über uns</p>");
    let resolver = Resolver::new("de")
        .with_tier(proxy(&proxy_url))
        .with_tier(direct(&direct_url, Some("client-key")));
    let res = resolver.resolve_detailed(&units, &store, "en").await;
    assert_eq!(res.tier, ResolvedTier::Remote(RemoteKind::DirectApi));
    assert_eq!(res.texts, vec!["About us".to_string()]);
    let reqs = mock::requests(&log);
    assert_eq!(reqs[0].query.get("key").map(String::as_str), Some("client-key"));
}

#[tokio::test]
/// What: A misaligned proxy response is discarded as a whole.
///
/// Inputs:
/// - Two units; proxy returns one translation only; no other remote tier.
///
/// Output:
/// - Static table / pass-through output for both units, none from the proxy.
async fn misaligned_response_falls_through() {
    let (url, _) = mock::fixed(
        "/translate",
        StatusCode::OK,
        r#"{"translations": ["FROM PROXY"]}"#,
    )
    .await;
    let (units, store) = inventory("<p>Startseite</p><p>Zufälliger Text</p>");
    let resolver = Resolver::new("de").with_tier(proxy(&url));
    let res = resolver.resolve_detailed(&units, &store, "en").await;
    assert_eq!(res.tier, ResolvedTier::FallbackTable);
    assert_eq!(
        res.texts,
        vec!["Home".to_string(), "Zufälliger Text".to_string()]
    );
}

#[tokio::test]
/// What: A success body without translations counts as malformed.
async fn malformed_success_body_falls_through() {
    let (url, _) = mock::fixed("/translate", StatusCode::OK, "not json at all").await;
    let (units, store) = inventory("<p>Impressum</p>");
    let texts = Resolver::new("de")
        .with_tier(proxy(&url))
        .resolve(&units, &store, "en")
        .await;
    assert_eq!(texts, vec!["Imprint".to_string()]);
}

#[tokio::test]
/// What: The batch carries pristine text even when units show translations.
///
/// Inputs:
/// - Units whose `current_text` was overwritten with English.
///
/// Output:
/// - The proxy receives the German originals.
async fn sends_pristine_text_not_current_text() {
    let (url, log) = mock::translator("/translate", &[], false).await;
    let (mut units, store) = inventory("<p>Willkommen bei uns</p>");
    units[0].current_text = "Welcome to us".to_string();
    let resolver = Resolver::new("de").with_tier(proxy(&url));
    let texts = resolver.resolve(&units, &store, "fr").await;
    assert_eq!(texts, vec!["[fr] Willkommen bei uns".to_string()]);
    assert_eq!(
        mock::submitted(&mock::requests(&log)[0]),
        vec!["Willkommen bei uns".to_string()]
    );
}

#[tokio::test]
/// What: Restoring to the source language never touches the network.
async fn source_language_skips_remote_tiers() {
    let (url, log) = mock::translator("/translate", &[], false).await;
    let (units, store) = inventory("<p>Willkommen bei uns</p>");
    let res = Resolver::new("de")
        .with_tier(proxy(&url))
        .resolve_detailed(&units, &store, "de")
        .await;
    assert_eq!(res.tier, ResolvedTier::Source);
    assert_eq!(res.texts, vec!["Willkommen bei uns".to_string()]);
    assert_eq!(mock::count(&log), 0);
}

#[tokio::test]
/// What: The resolver reaches the upstream API through the real proxy service.
///
/// Inputs:
/// - Proxy router with a key, forwarding to a nested-shape upstream mock.
///
/// Output:
/// - Translations relayed end to end; upstream saw the server-side key.
async fn resolves_through_proxy_service() {
    use std::sync::Arc;

    let (upstream_url, upstream_log) =
        mock::translator("/v2", &[("Datenschutz", "Data protection")], true).await;
    let state = inplace_translator::proxy::ProxyState::new(
        reqwest::Client::new(),
        Some(Zeroizing::new("server-key".to_string())),
        &upstream_url,
    );
    let addr = mock::spawn(inplace_translator::proxy::router(Arc::new(state))).await;
    let (units, store) = inventory("<p>Datenschutz</p>");
    let res = Resolver::new("de")
        .with_tier(proxy(&format!("http://{addr}/translate")))
        .resolve_detailed(&units, &store, "en")
        .await;
    assert_eq!(res.tier, ResolvedTier::Remote(RemoteKind::Proxy));
    assert_eq!(res.texts, vec!["Data protection".to_string()]);
    let reqs = mock::requests(&upstream_log);
    assert_eq!(reqs[0].query.get("key").map(String::as_str), Some("server-key"));
}

#[tokio::test]
/// What: Collect, resolve and rewrite one paragraph, then restore it.
///
/// Inputs:
/// - Document with the paragraph "Willkommen bei uns"; proxy returning `["Welcome to us"]`.
///
/// Output:
/// - One `block_0` unit; paragraph reads "Welcome to us", then exactly the original again.
async fn paragraph_translate_and_restore() {
    let (url, _) = mock::fixed(
        "/translate",
        StatusCode::OK,
        r#"{"translations": ["Welcome to us"]}"#,
    )
    .await;
    let mut doc = Document::parse("<p>Willkommen bei uns</p>");
    let mut store = OriginalStore::new();
    let rules = ExclusionRules::default();
    let units = collect(&doc, &rules, &mut store);
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].key, "block_0");
    assert_eq!(units[0].current_text, "Willkommen bei uns");

    let resolver = Resolver::new("de").with_tier(proxy(&url));
    let texts = resolver.resolve(&units, &store, "en").await;
    inplace_translator::rewriter::apply(&mut doc, &units, &texts);
    assert!(doc.to_html().contains("<p>Welcome to us</p>"));

    let units = collect(&doc, &rules, &mut store);
    let texts = resolver.resolve(&units, &store, "de").await;
    inplace_translator::rewriter::apply(&mut doc, &units, &texts);
    assert!(doc.to_html().contains("<p>Willkommen bei uns</p>"));
    assert_eq!(store.get("block_0"), Some("Willkommen bei uns"));
}
