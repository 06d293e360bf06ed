//! Text inventory builder.
//!
//! # Overview
//!
//! [`collect`] walks a [`Document`] and returns the translatable units in a
//! deterministic order:
//!
//! 1. **Block pass**: every heading/paragraph element (document order) that
//!    is not inside an opt-out region and whose trimmed text has at least
//!    `min_chars` characters becomes an [`UnitKind::Element`] unit keyed
//!    `block_<n>`.
//! 2. **Inline pass**: every remaining text node under `<body>` that passes
//!    [`ExclusionRules::accepts_text`] becomes an [`UnitKind::TextNode`] unit
//!    keyed `inline_<n>`.
//!
//! One counter numbers both passes. The first time a key is seen its text is
//! recorded in the [`OriginalStore`]; element units store trimmed text, text
//! node units store the raw value.
//!
//! Keys are positional. Content inserted or removed between collections
//! shifts the numbering and the stored originals no longer line up with the
//! shifted units; collection does not try to reconcile this.

mod originals;
mod rules;

pub use originals::{OriginalStore, TranslationContext};
pub use rules::{ExclusionRules, has_letters, is_content_editable};

use crate::dom::{Document, NodeHandle};

/// Key prefix for element units.
pub const BLOCK_PREFIX: &str = "block_";
/// Key prefix for text node units.
pub const INLINE_PREFIX: &str = "inline_";

/// What the unit's handle points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// Heading/paragraph owning its whole text content.
    Element,
    /// Single text fragment.
    TextNode,
}

/// One translatable piece of the page from a single collection pass.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TranslatableUnit {
    /// Stable positional key (`block_<n>` / `inline_<n>`).
    pub key: String,
    /// Element or text node unit.
    pub kind: UnitKind,
    /// Weak handle into the document.
    #[serde(skip)]
    pub handle: NodeHandle,
    /// Text observed at collection time (may already be translated).
    pub current_text: String,
}

/// What: Collect translatable units and record first-seen originals.
///
/// Inputs:
/// - `doc`: Document to scan
/// - `rules`: Selection/exclusion rules
/// - `originals`: Append-only original store updated in place
///
/// Output:
/// - Units in key order (all block units, then all inline units)
///
/// Details:
/// - Idempotent on an unmodified document: same keys, same order.
/// - Never overwrites an original already stored for a key.
pub fn collect(
    doc: &Document,
    rules: &ExclusionRules,
    originals: &mut OriginalStore,
) -> Vec<TranslatableUnit> {
    let mut units = Vec::new();
    let mut seq = 0usize;

    for id in doc.descendants(doc.root()) {
        let Some(el) = doc.element(id) else {
            continue;
        };
        if !rules.is_block(el) || rules.in_opt_out_region(doc, id) {
            continue;
        }
        let content = doc.text_content(id);
        let text = content.trim();
        if text.is_empty() || text.chars().count() < rules.min_chars {
            continue;
        }
        let key = format!("{BLOCK_PREFIX}{seq}");
        seq += 1;
        originals.record(&key, text);
        units.push(TranslatableUnit {
            key,
            kind: UnitKind::Element,
            handle: id,
            current_text: text.to_string(),
        });
    }
    let blocks = units.len();

    if let Some(body) = doc.body() {
        for id in doc.descendants(body) {
            let Some(value) = doc
                .node(id)
                .and_then(|n| n.value().as_text().map(str::to_string))
            else {
                continue;
            };
            let trimmed = value.trim();
            if trimmed.is_empty() || !rules.accepts_text(doc, id, trimmed) {
                continue;
            }
            let key = format!("{INLINE_PREFIX}{seq}");
            seq += 1;
            originals.record(&key, &value);
            units.push(TranslatableUnit {
                key,
                kind: UnitKind::TextNode,
                handle: id,
                current_text: value,
            });
        }
    }

    tracing::debug!(
        blocks,
        inline = units.len() - blocks,
        originals = originals.len(),
        "collected translatable units"
    );
    units
}

impl TranslationContext {
    /// What: Run a collection pass and remember it as the latest inventory.
    ///
    /// Inputs:
    /// - `doc`: Document to scan
    /// - `rules`: Selection/exclusion rules
    ///
    /// Output:
    /// - Slice of the freshly collected units
    pub fn collect(&mut self, doc: &Document, rules: &ExclusionRules) -> &[TranslatableUnit] {
        self.last_inventory = collect(doc, rules, &mut self.originals);
        &self.last_inventory
    }
}
