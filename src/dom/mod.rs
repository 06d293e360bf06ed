//! Synthetic document model used by the inventory builder and the rewriter.
//!
//! # Overview
//!
//! A [`Document`] is an arena tree (`ego_tree::Tree`) of [`DomNode`] values.
//! It is built from HTML with `scraper` and serialised back to HTML, but
//! every translation operation works against this model only, so tests can
//! build documents from small HTML snippets without a rendering engine.
//!
//! Node handles are [`NodeHandle`]s (`ego_tree::NodeId`). A handle does not
//! keep a node in the document: after [`Document::detach`] the handle is
//! still valid for the arena, but [`Document::is_attached`] reports `false`
//! and the rewriter ignores it.

mod parse;
mod serialize;

use ego_tree::{NodeRef, Tree};

/// Weak reference to a node in a [`Document`].
pub type NodeHandle = ego_tree::NodeId;

/// Element name and attributes in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Lowercase local tag name (e.g. `p`, `h1`, `svg`).
    pub name: String,
    /// Attributes as `(name, value)` pairs.
    pub attrs: Vec<(String, String)>,
}

impl ElementData {
    /// What: Create element data with no attributes.
    ///
    /// Inputs:
    /// - `name`: Tag name (stored lowercase)
    ///
    /// Output:
    /// - `ElementData` ready to be inserted into a tree
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            attrs: Vec::new(),
        }
    }

    /// Value of attribute `name`, if present.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Whether attribute `name` is present (any value).
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Replace or insert attribute `name`.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if let Some(slot) = self
            .attrs
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            slot.1 = value.to_string();
        } else {
            self.attrs.push((name.to_string(), value.to_string()));
        }
    }
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomNode {
    /// Tree root.
    Document,
    /// `<!DOCTYPE name>`.
    Doctype(String),
    /// Element with its attributes.
    Element(ElementData),
    /// Character data.
    Text(String),
    /// `<!-- comment -->`.
    Comment(String),
}

impl DomNode {
    /// Element data when this node is an element.
    #[must_use]
    pub const fn as_element(&self) -> Option<&ElementData> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Text value when this node is a text node.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t.as_str()),
            _ => None,
        }
    }
}

/// Mutable document tree.
#[derive(Debug, Clone)]
pub struct Document {
    /// Arena holding every node ever created, attached or not.
    tree: Tree<DomNode>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            tree: Tree::new(DomNode::Document),
        }
    }
}

impl Document {
    /// What: Parse an HTML document into the synthetic tree model.
    ///
    /// Inputs:
    /// - `html`: Full HTML document or fragment; missing `html`/`head`/`body`
    ///   wrappers are synthesised by the HTML parser
    ///
    /// Output:
    /// - `Document` mirroring the parsed tree
    #[must_use]
    pub fn parse(html: &str) -> Self {
        parse::from_html(html)
    }

    /// What: Serialise the current tree back to HTML.
    ///
    /// Output:
    /// - HTML string; detached nodes are not emitted
    #[must_use]
    pub fn to_html(&self) -> String {
        serialize::to_html(self.tree.root())
    }

    /// Handle of the document root.
    #[must_use]
    pub fn root(&self) -> NodeHandle {
        self.tree.root().id()
    }

    /// Read access to a node.
    #[must_use]
    pub fn node(&self, id: NodeHandle) -> Option<NodeRef<'_, DomNode>> {
        self.tree.get(id)
    }

    /// Element data for `id`, when it is an element.
    #[must_use]
    pub fn element(&self, id: NodeHandle) -> Option<&ElementData> {
        self.tree.get(id).and_then(|n| n.value().as_element())
    }

    /// What: Find the `<body>` element.
    ///
    /// Output:
    /// - First `body` element in document order, or `None`
    #[must_use]
    pub fn body(&self) -> Option<NodeHandle> {
        self.tree
            .root()
            .descendants()
            .find(|n| n.value().as_element().is_some_and(|el| el.name == "body"))
            .map(|n| n.id())
    }

    /// What: Find an element by its `id` attribute.
    ///
    /// Inputs:
    /// - `element_id`: Value of the `id` attribute
    ///
    /// Output:
    /// - First attached element carrying that id, or `None`
    #[must_use]
    pub fn element_by_id(&self, element_id: &str) -> Option<NodeHandle> {
        self.tree
            .root()
            .descendants()
            .find(|n| {
                n.value()
                    .as_element()
                    .is_some_and(|el| el.attr("id") == Some(element_id))
            })
            .map(|n| n.id())
    }

    /// What: Nearest element ancestor of a node (excluding the node itself).
    ///
    /// Inputs:
    /// - `id`: Any node handle
    ///
    /// Output:
    /// - Handle of the closest ancestor that is an element, or `None`
    #[must_use]
    pub fn parent_element(&self, id: NodeHandle) -> Option<NodeHandle> {
        self.tree
            .get(id)?
            .ancestors()
            .find(|n| n.value().as_element().is_some())
            .map(|n| n.id())
    }

    /// What: Find the closest element, starting at `id` itself, matching a predicate.
    ///
    /// Inputs:
    /// - `id`: Starting node
    /// - `pred`: Predicate over element data
    ///
    /// Output:
    /// - Handle of the first match walking upwards, or `None`
    ///
    /// Details:
    /// - Mirrors `Element.closest`: the start node is tested first when it
    ///   is an element; non-element nodes are skipped.
    pub fn closest<F>(&self, id: NodeHandle, pred: F) -> Option<NodeHandle>
    where
        F: Fn(&ElementData) -> bool,
    {
        let node = self.tree.get(id)?;
        std::iter::once(node)
            .chain(node.ancestors())
            .find(|n| n.value().as_element().is_some_and(&pred))
            .map(|n| n.id())
    }

    /// What: Concatenate all descendant text of a node.
    ///
    /// Inputs:
    /// - `id`: Element (or text) node
    ///
    /// Output:
    /// - Text content in document order; empty for unknown handles
    #[must_use]
    pub fn text_content(&self, id: NodeHandle) -> String {
        let Some(node) = self.tree.get(id) else {
            return String::new();
        };
        node.descendants()
            .filter_map(|n| n.value().as_text())
            .collect()
    }

    /// What: Check whether a node is still reachable from the document root.
    ///
    /// Inputs:
    /// - `id`: Node handle
    ///
    /// Output:
    /// - `true` when the node's ancestor chain ends at the root
    #[must_use]
    pub fn is_attached(&self, id: NodeHandle) -> bool {
        let root = self.tree.root().id();
        let Some(node) = self.tree.get(id) else {
            return false;
        };
        if node.id() == root {
            return true;
        }
        node.ancestors().last().is_some_and(|top| top.id() == root)
    }

    /// All handles below `id` (inclusive) in document order.
    #[must_use]
    pub fn descendants(&self, id: NodeHandle) -> Vec<NodeHandle> {
        self.tree
            .get(id)
            .map(|n| n.descendants().map(|d| d.id()).collect())
            .unwrap_or_default()
    }

    /// What: Replace all children of an element with a single text node.
    ///
    /// Inputs:
    /// - `id`: Element handle
    /// - `text`: New text content
    ///
    /// Output:
    /// - `true` when the node exists and is an element
    ///
    /// Details:
    /// - Equivalent to assigning `textContent`; old children become detached.
    pub fn set_text_content(&mut self, id: NodeHandle, text: &str) -> bool {
        let Some(mut node) = self.tree.get_mut(id) else {
            return false;
        };
        if !matches!(node.value(), DomNode::Element(_)) {
            return false;
        }
        while let Some(mut child) = node.first_child() {
            child.detach();
        }
        if !text.is_empty() {
            node.append(DomNode::Text(text.to_string()));
        }
        true
    }

    /// What: Replace the value of a text node.
    ///
    /// Inputs:
    /// - `id`: Text node handle
    /// - `text`: New value
    ///
    /// Output:
    /// - `true` when the node exists and is a text node
    pub fn set_text_value(&mut self, id: NodeHandle, text: &str) -> bool {
        let Some(mut node) = self.tree.get_mut(id) else {
            return false;
        };
        match node.value() {
            DomNode::Text(value) => {
                text.clone_into(value);
                true
            }
            _ => false,
        }
    }

    /// Set attribute `name` on element `id`; returns `false` for non-elements.
    pub fn set_attr(&mut self, id: NodeHandle, name: &str, value: &str) -> bool {
        let Some(mut node) = self.tree.get_mut(id) else {
            return false;
        };
        match node.value() {
            DomNode::Element(el) => {
                el.set_attr(name, value);
                true
            }
            _ => false,
        }
    }

    /// Remove a node (and its subtree) from the document, keeping the handle valid.
    pub fn detach(&mut self, id: NodeHandle) {
        if let Some(mut node) = self.tree.get_mut(id) {
            node.detach();
        }
    }
}
