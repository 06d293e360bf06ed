//! Selection and exclusion rules for the inventory builder.

use crate::dom::{Document, ElementData, NodeHandle};

/// Configurable tag and attribute sets used while collecting units.
#[derive(Debug, Clone)]
pub struct ExclusionRules {
    /// Tags captured whole as element units.
    pub block_tags: Vec<String>,
    /// Parent tags whose direct text is never collected.
    pub raw_parent_tags: Vec<String>,
    /// Form controls whose text is never collected.
    pub control_tags: Vec<String>,
    /// Subtree roots (matched on self or ancestors) that are never collected.
    pub foreign_subtree_tags: Vec<String>,
    /// Attribute that opts a subtree out of translation.
    pub opt_out_attr: String,
    /// Element ids whose subtree is never collected (the toggle button labels itself).
    pub excluded_ids: Vec<String>,
    /// Minimum trimmed length, in characters, of a collected unit.
    pub min_chars: usize,
}

impl Default for ExclusionRules {
    fn default() -> Self {
        Self {
            block_tags: ["h1", "h2", "h3", "h4", "h5", "h6", "p"]
                .into_iter()
                .map(String::from)
                .collect(),
            raw_parent_tags: ["script", "style", "noscript", "code", "pre"]
                .into_iter()
                .map(String::from)
                .collect(),
            control_tags: ["input", "textarea", "select"]
                .into_iter()
                .map(String::from)
                .collect(),
            foreign_subtree_tags: vec!["svg".to_string()],
            opt_out_attr: "data-no-translate".to_string(),
            excluded_ids: vec![crate::controller::TOGGLE_ELEMENT_ID.to_string()],
            min_chars: 2,
        }
    }
}

impl ExclusionRules {
    /// Whether `el` is a heading/paragraph captured as a whole.
    #[must_use]
    pub fn is_block(&self, el: &ElementData) -> bool {
        self.block_tags.iter().any(|t| *t == el.name)
    }

    /// What: Check whether an element opts its subtree out of translation.
    ///
    /// Inputs:
    /// - `el`: Element data
    ///
    /// Output:
    /// - `true` for the configured opt-out attribute, the standard `translate="no"`
    ///   or an excluded element id
    #[must_use]
    pub fn is_opt_out(&self, el: &ElementData) -> bool {
        el.has_attr(&self.opt_out_attr)
            || el
                .attr("id")
                .is_some_and(|id| self.excluded_ids.iter().any(|x| x == id))
            || el
                .attr("translate")
                .is_some_and(|v| v.trim().eq_ignore_ascii_case("no"))
    }

    /// What: Check whether a node lies inside an opted-out region.
    ///
    /// Inputs:
    /// - `doc`: Document
    /// - `id`: Node to test (itself included)
    #[must_use]
    pub fn in_opt_out_region(&self, doc: &Document, id: NodeHandle) -> bool {
        doc.closest(id, |el| self.is_opt_out(el)).is_some()
    }

    /// What: Decide whether a text node may become an inline unit.
    ///
    /// Inputs:
    /// - `doc`: Document
    /// - `text_node`: Handle of the text node
    /// - `trimmed`: Trimmed text value
    ///
    /// Output:
    /// - `true` when none of the rejection rules apply
    ///
    /// Details:
    /// - Rejected: text without a parent element; parent in the raw tag set;
    ///   inside an SVG subtree; parent is a form control; inside an opt-out
    ///   region; inside an editable region; inside a block element; shorter
    ///   than `min_chars`; digits and punctuation only.
    #[must_use]
    pub fn accepts_text(&self, doc: &Document, text_node: NodeHandle, trimmed: &str) -> bool {
        let Some(parent) = doc.parent_element(text_node) else {
            return false;
        };
        let Some(parent_el) = doc.element(parent) else {
            return false;
        };
        if self.raw_parent_tags.iter().any(|t| *t == parent_el.name) {
            return false;
        }
        if doc
            .closest(parent, |el| {
                self.foreign_subtree_tags.iter().any(|t| *t == el.name)
            })
            .is_some()
        {
            return false;
        }
        if self.control_tags.iter().any(|t| *t == parent_el.name) {
            return false;
        }
        if self.in_opt_out_region(doc, parent) {
            return false;
        }
        if is_content_editable(doc, parent) {
            return false;
        }
        if doc.closest(parent, |el| self.is_block(el)).is_some() {
            return false;
        }
        if trimmed.chars().count() < self.min_chars {
            return false;
        }
        has_letters(trimmed)
    }
}

/// What: Resolve the inherited editability of an element.
///
/// Inputs:
/// - `doc`: Document
/// - `id`: Element handle
///
/// Output:
/// - `true` when the nearest element with a valid `contenteditable` value enables editing
///
/// Details:
/// - `""`, `true` and `plaintext-only` enable editing, `false` disables it;
///   any other value inherits from the parent.
#[must_use]
pub fn is_content_editable(doc: &Document, id: NodeHandle) -> bool {
    let mut current = Some(id);
    while let Some(node) = current {
        if let Some(value) = doc.element(node).and_then(|el| el.attr("contenteditable")) {
            match value.trim().to_ascii_lowercase().as_str() {
                "" | "true" | "plaintext-only" => return true,
                "false" => return false,
                _ => {}
            }
        }
        current = doc.parent_element(node);
    }
    false
}

/// Whether `text` contains at least one letter (rejects digit/punctuation-only strings).
#[must_use]
pub fn has_letters(text: &str) -> bool {
    text.chars().any(char::is_alphabetic)
}
