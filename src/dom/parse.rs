//! HTML to [`Document`] conversion using `scraper`.

use ego_tree::{NodeMut, NodeRef, Tree};
use scraper::{Html, Node};

use super::{Document, DomNode, ElementData};

/// What: Parse HTML with `scraper` and copy the result into a [`Document`].
///
/// Inputs:
/// - `html`: HTML source text
///
/// Output:
/// - Document whose tree mirrors the parsed DOM
///
/// Details:
/// - Processing instructions are dropped; fragments are flattened into their parent.
pub(super) fn from_html(html: &str) -> Document {
    let parsed = Html::parse_document(html);
    let mut tree = Tree::new(DomNode::Document);
    {
        let mut root = tree.root_mut();
        for child in parsed.tree.root().children() {
            copy_node(child, &mut root);
        }
    }
    Document { tree }
}

/// What: Recursively copy a `scraper` node under `dst`.
///
/// Inputs:
/// - `src`: Source node from the `scraper` tree
/// - `dst`: Destination parent in the synthetic tree
fn copy_node(src: NodeRef<'_, Node>, dst: &mut NodeMut<'_, DomNode>) {
    let value = match src.value() {
        Node::Element(el) => DomNode::Element(ElementData {
            name: el.name().to_ascii_lowercase(),
            attrs: el
                .attrs()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }),
        Node::Text(t) => DomNode::Text(String::from(&**t)),
        Node::Comment(c) => DomNode::Comment(String::from(&**c)),
        Node::Doctype(d) => DomNode::Doctype(d.name().to_string()),
        Node::Document | Node::Fragment => {
            for child in src.children() {
                copy_node(child, dst);
            }
            return;
        }
        Node::ProcessingInstruction(_) => return,
    };
    let mut copied = dst.append(value);
    for child in src.children() {
        copy_node(child, &mut copied);
    }
}
