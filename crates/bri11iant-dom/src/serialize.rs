//! HTML Serialization (innerHTML/outerHTML)
//!
//! Follows the HTML fragment serialization algorithm so that an element's
//! `outerHTML` matches the markup an author typically wrote. The linter
//! relies on this to find elements again in the original source text.

use crate::{DomTree, Namespace, NodeData, NodeId};

/// Void elements (no end tag, never have children)
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr",
    "img", "input", "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Elements whose text children are emitted without escaping
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "style", "script", "xmp", "iframe", "noembed", "noframes", "plaintext", "noscript",
];

/// Serialize a node including itself (`outerHTML`)
pub fn serialize_outer(tree: &DomTree, id: NodeId) -> String {
    let mut output = String::new();
    serialize_node(tree, id, &mut output);
    output
}

/// Serialize the children of a node (`innerHTML`)
pub fn serialize_inner(tree: &DomTree, id: NodeId) -> String {
    let mut output = String::new();
    serialize_children(tree, id, &mut output);
    output
}

/// Serialize a whole document, doctype included
pub fn serialize_document(tree: &DomTree) -> String {
    serialize_inner(tree, tree.root())
}

enum Step {
    Node(NodeId),
    EndTag(NodeId),
}

/// Serialize `id` into `output` with an explicit work stack, so deeply
/// nested documents cannot exhaust the call stack
fn serialize_node(tree: &DomTree, id: NodeId, output: &mut String) {
    let mut stack = vec![Step::Node(id)];

    while let Some(step) = stack.pop() {
        let id = match step {
            Step::Node(id) => id,
            Step::EndTag(id) => {
                if let Some(elem) = tree.element(id) {
                    output.push_str("</");
                    output.push_str(&elem.name);
                    output.push('>');
                }
                continue;
            }
        };
        let Some(node) = tree.get(id) else {
            continue;
        };

        match &node.data {
            NodeData::Document => push_children(tree, id, &mut stack),
            NodeData::Element(elem) => {
                output.push('<');
                output.push_str(&elem.name);
                for attr in &elem.attrs {
                    output.push(' ');
                    output.push_str(&attr.name);
                    output.push_str("=\"");
                    escape_attribute(&attr.value, output);
                    output.push('"');
                }
                output.push('>');

                let is_html = elem.namespace == Namespace::Html;
                if is_html && VOID_ELEMENTS.contains(&elem.name.as_str()) {
                    continue;
                }

                stack.push(Step::EndTag(id));
                push_children(tree, id, &mut stack);
            }
            NodeData::Text(text) => {
                let raw = tree
                    .element(node.parent)
                    .is_some_and(|p| p.namespace == Namespace::Html && RAW_TEXT_ELEMENTS.contains(&p.name.as_str()));
                if raw {
                    output.push_str(text);
                } else {
                    escape_text(text, output);
                }
            }
            NodeData::Comment(text) => {
                output.push_str("<!--");
                output.push_str(text);
                output.push_str("-->");
            }
            NodeData::Doctype { name, .. } => {
                output.push_str("<!DOCTYPE ");
                output.push_str(name);
                output.push('>');
            }
        }
    }
}

fn serialize_children(tree: &DomTree, parent: NodeId, output: &mut String) {
    for (child, _) in tree.children(parent) {
        serialize_node(tree, child, output);
    }
}

/// Queue children so they pop in document order
fn push_children(tree: &DomTree, parent: NodeId, stack: &mut Vec<Step>) {
    let start = stack.len();
    stack.extend(tree.children(parent).map(|(child, _)| Step::Node(child)));
    stack[start..].reverse();
}

/// Escape text content for HTML
fn escape_text(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
}

/// Escape attribute value
fn escape_attribute(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            '"' => output.push_str("&quot;"),
            _ => output.push(c),
        }
    }
}
