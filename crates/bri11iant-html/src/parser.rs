//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it to the arena DOM. Whitespace-only
//! text is kept: element serialization must reproduce the source markup.

use bri11iant_dom::{Document, DomTree, ElementData, Namespace, NodeId};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use crate::HtmlError;

/// HTML5 parser
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Result<Document, HtmlError> {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a base URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Result<Document, HtmlError> {
        tracing::debug!("Parsing HTML document: {}", url);

        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())?;

        let mut document = Document::empty(url);
        self.convert(&dom.document, document.tree_mut());
        document.finalize();

        // The tree builder always synthesizes <html>; losing it means the
        // conversion itself went wrong.
        if !document.document_element().is_valid() {
            return Err(HtmlError::NoDocumentElement);
        }

        tracing::debug!("Parsed {} nodes", document.tree().len());
        Ok(document)
    }

    /// Convert an RcDom tree to our DOM format
    ///
    /// Walks with an explicit stack; nesting depth is bounded only by memory.
    fn convert(&self, root: &Handle, tree: &mut DomTree) {
        let mut stack: Vec<(Handle, NodeId)> = vec![(root.clone(), NodeId::ROOT)];

        while let Some((handle, parent)) = stack.pop() {
            match &handle.data {
                RcNodeData::Document => {
                    push_children(&mut stack, &handle, parent);
                }
                RcNodeData::Doctype { name, public_id, system_id } => {
                    let id = tree.create_doctype(name, public_id, system_id);
                    tree.append_child(parent, id);
                }
                RcNodeData::Text { contents } => {
                    let id = tree.create_text(&contents.borrow());
                    tree.append_child(parent, id);
                }
                RcNodeData::Comment { contents } => {
                    let id = tree.create_comment(contents);
                    tree.append_child(parent, id);
                }
                RcNodeData::Element { name, attrs, template_contents, .. } => {
                    let namespace = Namespace::from_url(name.ns.as_ref());
                    let mut elem = ElementData::with_namespace(name.local.as_ref(), namespace);

                    for attr in attrs.borrow().iter() {
                        let local: &str = attr.name.local.as_ref();
                        let attr_name = match &attr.name.prefix {
                            Some(prefix) => format!("{}:{}", prefix.as_ref() as &str, local),
                            None => local.to_string(),
                        };
                        elem.attrs.push(bri11iant_dom::Attribute {
                            name: attr_name,
                            value: attr.value.to_string(),
                        });
                    }

                    let id = tree.create_element_with(elem);
                    tree.append_child(parent, id);

                    // Popped last-in first-out: regular children go below the
                    // template fragment so the fragment is converted first.
                    push_children(&mut stack, &handle, id);
                    if let Some(content) = template_contents.borrow().as_ref() {
                        push_children(&mut stack, content, id);
                    }
                }
                RcNodeData::ProcessingInstruction { .. } => {
                    // Not part of HTML documents
                }
            }
        }
    }
}

/// Queue the children of `handle` so they pop in document order
fn push_children(stack: &mut Vec<(Handle, NodeId)>, handle: &Handle, parent: NodeId) {
    stack.extend(handle.children.borrow().iter().rev().map(|child| (child.clone(), parent)));
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
        let doc = HtmlParser::new().parse(html).unwrap();

        assert!(doc.tree().len() > 1, "Expected more than 1 node, got {}", doc.tree().len());
        assert_eq!(doc.title(), "Test");
        assert!(doc.body().is_valid());
    }

    #[test]
    fn test_parse_fragment() {
        let html = "<div><span>Text</span></div>";
        let doc = HtmlParser::new().parse(html).unwrap();

        // Even fragments get wrapped in html/head/body by html5ever
        assert!(doc.head().is_valid());
        assert_eq!(doc.elements_by_tag("span").count(), 1);
    }

    #[test]
    fn test_outer_html_matches_source() {
        let html = "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <title>T</title>\n</head>\n<body>\n  <img src=\"cat.png\" alt=\"\">\n  <a href=\"/x\">Go &amp; see</a>\n</body>\n</html>";
        let doc = HtmlParser::new().parse(html).unwrap();

        for tag in ["img", "a", "head", "title"] {
            let elem = doc.elements_by_tag(tag).next().unwrap();
            assert!(html.contains(&elem.outer_html()), "{} not found verbatim", elem.outer_html());
        }
    }

    #[test]
    fn test_attribute_names_lowercased() {
        let doc = HtmlParser::new().parse(r#"<DIV ROLE="main" Aria-Label="x"></DIV>"#).unwrap();
        let div = doc.elements_by_tag("div").next().unwrap();

        assert_eq!(div.attr("role"), Some("main"));
        assert_eq!(div.data().attrs[1].name, "aria-label");
    }

    #[test]
    fn test_template_content_is_kept() {
        let doc = HtmlParser::new()
            .parse("<template><p role=\"note\">x</p></template>")
            .unwrap();
        let template = doc.elements_by_tag("template").next().unwrap();
        assert_eq!(template.outer_html(), "<template><p role=\"note\">x</p></template>");
    }

    #[test]
    fn test_deeply_nested_markup() {
        const DEPTH: usize = 20_000;
        let html = format!("{}x{}", "<span>".repeat(DEPTH), "</span>".repeat(DEPTH));

        // Small stack, like an executor thread
        let handle = std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(move || {
                let doc = HtmlParser::new().parse(&html).unwrap();
                let outer = doc.elements_by_tag("span").next().unwrap().outer_html();
                (doc.elements_by_tag("span").count(), outer.len())
            })
            .unwrap();

        let (spans, serialized) = handle.join().unwrap();
        assert_eq!(spans, DEPTH);
        assert_eq!(serialized, DEPTH * "<span></span>".len() + 1);
    }

    #[test]
    fn test_sibling_order_kept() {
        let doc = HtmlParser::new().parse("<ul><li>1</li><li>2</li><li>3</li></ul>").unwrap();
        let ul = doc.elements_by_tag("ul").next().unwrap();
        assert_eq!(ul.inner_html(), "<li>1</li><li>2</li><li>3</li>");
    }

    #[test]
    fn test_svg_namespace() {
        let doc = HtmlParser::new().parse("<svg role=\"img\"><title>Logo</title></svg>").unwrap();
        let svg = doc.elements_by_tag("svg").next().unwrap();
        assert_eq!(svg.namespace(), Namespace::Svg);
    }
}
