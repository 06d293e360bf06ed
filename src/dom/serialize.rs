//! [`Document`](super::Document) to HTML serialisation.

use ego_tree::NodeRef;

use super::DomNode;

/// Elements that never have an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose text children are emitted verbatim.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "xmp", "iframe", "noembed", "noframes"];

/// What: Serialise a subtree to HTML.
///
/// Inputs:
/// - `node`: Subtree root (usually the document root)
///
/// Output:
/// - HTML text
pub(super) fn to_html(node: NodeRef<'_, DomNode>) -> String {
    let mut buf = String::new();
    write_node(&mut buf, node, false);
    buf
}

/// What: Append one node and its children to `buf`.
///
/// Inputs:
/// - `buf`: Output buffer
/// - `node`: Node to write
/// - `raw_text`: Whether the parent is a raw-text element (no escaping)
fn write_node(buf: &mut String, node: NodeRef<'_, DomNode>, raw_text: bool) {
    match node.value() {
        DomNode::Document => {
            for child in node.children() {
                write_node(buf, child, false);
            }
        }
        DomNode::Doctype(name) => {
            buf.push_str("<!DOCTYPE ");
            buf.push_str(name);
            buf.push('>');
        }
        DomNode::Comment(c) => {
            buf.push_str("<!--");
            buf.push_str(c);
            buf.push_str("-->");
        }
        DomNode::Text(t) => {
            if raw_text {
                buf.push_str(t);
            } else {
                push_escaped(buf, t, false);
            }
        }
        DomNode::Element(el) => {
            buf.push('<');
            buf.push_str(&el.name);
            for (k, v) in &el.attrs {
                buf.push(' ');
                buf.push_str(k);
                buf.push_str("=\"");
                push_escaped(buf, v, true);
                buf.push('"');
            }
            buf.push('>');
            if VOID_ELEMENTS.contains(&el.name.as_str()) {
                return;
            }
            let child_raw = RAW_TEXT_ELEMENTS.contains(&el.name.as_str());
            for child in node.children() {
                write_node(buf, child, child_raw);
            }
            buf.push_str("</");
            buf.push_str(&el.name);
            buf.push('>');
        }
    }
}

/// What: Escape text for HTML output.
///
/// Inputs:
/// - `buf`: Output buffer
/// - `text`: Raw text
/// - `attr`: Attribute mode escapes `"` instead of `<`/`>`
fn push_escaped(buf: &mut String, text: &str, attr: bool) {
    for ch in text.chars() {
        match ch {
            '&' => buf.push_str("&amp;"),
            '\u{a0}' => buf.push_str("&nbsp;"),
            '"' if attr => buf.push_str("&quot;"),
            '<' if !attr => buf.push_str("&lt;"),
            '>' if !attr => buf.push_str("&gt;"),
            _ => buf.push(ch),
        }
    }
}
