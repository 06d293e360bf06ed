//! Writes resolved text back onto the units it came from.

use crate::dom::Document;
use crate::inventory::{TranslatableUnit, UnitKind};

/// What: Apply resolved texts to their units.
///
/// Inputs:
/// - `doc`: Document to mutate
/// - `units`: Units from the collection that produced the batch
/// - `texts`: Resolved strings, aligned with `units`
///
/// Output:
/// - None; each attached unit shows its string afterwards
///
/// Details:
/// - Element units get whole-text replacement, text node units a value replacement.
/// - Units whose handle is no longer attached to the document are skipped silently.
/// - Extra entries on either side are ignored.
pub fn apply(doc: &mut Document, units: &[TranslatableUnit], texts: &[String]) {
    if units.len() != texts.len() {
        tracing::debug!(
            units = units.len(),
            texts = texts.len(),
            "unit and text counts differ; applying the common prefix"
        );
    }
    let mut applied = 0usize;
    let mut detached = 0usize;
    for (unit, text) in units.iter().zip(texts) {
        if !doc.is_attached(unit.handle) {
            detached += 1;
            continue;
        }
        let written = match unit.kind {
            UnitKind::Element => doc.set_text_content(unit.handle, text),
            UnitKind::TextNode => doc.set_text_value(unit.handle, text),
        };
        if written {
            applied += 1;
        }
    }
    tracing::debug!(applied, detached, "rewrote units");
}
