//! Integration tests for the full toggle flow against a mock proxy.
//!
//! Tests cover:
//! - Translate, restore and re-translate without double translation
//! - Preference persistence in a preference file
//! - Saved language applied on page load

#![cfg(test)]

use inplace_translator::controller::{DisplayState, ToggleController};
use inplace_translator::dom::Document;
use inplace_translator::prefs::{FileStorage, KeyValueStorage, LANGUAGE_KEY, PreferenceStore};
use inplace_translator::resolver::{RemoteKind, RemoteTier, ResolvedTier, Resolver};

use crate::mock;

const PAGE: &str = "<!DOCTYPE html><html lang=\"de\"><head><title>FlowTech</title></head>\
<body><header><button id=\"lang-toggle\" aria-pressed=\"false\">EN</button>\
<nav><a href=\"/\">Startseite</a> <a href=\"/kontakt\">Kontakt</a></nav></header>\
<main><h1>Willkommen bei uns</h1>\
<p data-no-translate>FlowTech Innovations</p>\
<pre>cargo run</pre></main></body></html>";

/// What: Build a controller with a proxy tier at `url` and a preference file in `dir`.
fn controller(url: &str, dir: &std::path::Path) -> ToggleController<FileStorage> {
    let resolver = Resolver::new("de").with_tier(RemoteTier::Proxy {
        url: url.to_string(),
    });
    let prefs = PreferenceStore::new(FileStorage::new(dir.join("preferences.json")), "de");
    ToggleController::new(Document::parse(PAGE), resolver, prefs, "en")
}

#[tokio::test]
/// What: Full toggle scenario with lossless restore.
///
/// Inputs:
/// - Page with a heading, navigation links, an opt-out paragraph and a `pre` block.
///
/// Output:
/// - Toggle to English shows "Welcome to us"; opt-out and `pre` text untouched.
/// - Toggle back restores the exact original document.
/// - Toggling again sends the German originals, never the English text.
/// - The toggle button's own label is never part of a batch.
async fn toggle_translate_restore_retranslate() {
    let (url, log) = mock::translator(
        "/translate",
        &[
            ("Willkommen bei uns", "Welcome to us"),
            ("Startseite", "Home"),
            ("Kontakt", "Contact"),
        ],
        false,
    )
    .await;
    let dir = tempfile::tempdir().expect("tempdir");
    let mut ctl = controller(&url, dir.path());
    assert_eq!(ctl.initialize().await, None);
    let pristine = ctl.document().to_html();

    let out = ctl.toggle().await;
    assert!(out.switched);
    assert_eq!(out.tier, ResolvedTier::Remote(RemoteKind::Proxy));
    let html = ctl.document().to_html();
    assert!(html.contains("<h1>Welcome to us</h1>"));
    assert!(html.contains(">Home</a>"));
    assert!(html.contains("FlowTech Innovations"));
    assert!(html.contains("<pre>cargo run</pre>"));
    assert!(html.contains("aria-pressed=\"true\""));
    assert_eq!(ctl.display_state(), DisplayState::ShowingTarget);
    assert_eq!(
        ctl.context().originals.get("block_0"),
        Some("Willkommen bei uns")
    );

    let back = ctl.toggle().await;
    assert_eq!(back.tier, ResolvedTier::Source);
    assert_eq!(ctl.document().to_html(), pristine);
    assert_eq!(mock::count(&log), 1);

    ctl.toggle().await;
    let reqs = mock::requests(&log);
    assert_eq!(reqs.len(), 2);
    assert_eq!(
        mock::submitted(&reqs[0]),
        vec![
            "Willkommen bei uns".to_string(),
            "Startseite".to_string(),
            "Kontakt".to_string()
        ]
    );
    assert_eq!(mock::submitted(&reqs[0]), mock::submitted(&reqs[1]));
    assert!(mock::submitted(&reqs[1]).contains(&"Willkommen bei uns".to_string()));
    assert!(!mock::submitted(&reqs[1]).contains(&"Welcome to us".to_string()));

    let stored = FileStorage::new(dir.path().join("preferences.json"));
    assert_eq!(
        stored.get(LANGUAGE_KEY).expect("read prefs").as_deref(),
        Some("en")
    );
}

#[tokio::test]
/// What: A saved English preference translates the page during load.
///
/// Inputs:
/// - Preference file holding `site-lang = en`.
///
/// Output:
/// - Page shows English after `initialize`; control pressed with label "DE".
async fn saved_preference_applied_on_load() {
    let (url, _) = mock::translator(
        "/translate",
        &[("Willkommen bei uns", "Welcome to us")],
        true,
    )
    .await;
    let dir = tempfile::tempdir().expect("tempdir");
    FileStorage::new(dir.path().join("preferences.json"))
        .set(LANGUAGE_KEY, "en")
        .expect("seed prefs");
    let mut ctl = controller(&url, dir.path());
    let out = ctl.initialize().await.expect("translated on load");
    assert!(out.switched);
    assert!(ctl.document().to_html().contains("<h1>Welcome to us</h1>"));
    assert!(ctl.control().pressed);
    assert_eq!(ctl.control().label, "DE");
}

#[tokio::test]
/// What: With the proxy down, known strings use the table and the rest stays German.
///
/// Inputs:
/// - Nothing listening on the proxy port.
///
/// Output:
/// - Navigation translated from the table, heading unchanged, state switched.
async fn proxy_down_uses_table() {
    let closed = mock::closed_addr().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let mut ctl = controller(&format!("http://{closed}/translate"), dir.path());
    ctl.initialize().await;
    let out = ctl.toggle().await;
    assert_eq!(out.tier, ResolvedTier::FallbackTable);
    let html = ctl.document().to_html();
    assert!(html.contains(">Home</a>"));
    assert!(html.contains(">Contact</a>"));
    assert!(html.contains("<h1>Willkommen bei uns</h1>"));
}
