//! Comprehensive tests for bri11iant-css
//!
//! Tests parsing edge cases and style computation against parsed HTML.

use bri11iant_css::{CssParser, StyleResolver, parse_color, parse_stylesheet, Rgba};
use bri11iant_dom::{Document, ElementData, NodeId};

/// Build `<html><head></head><body>` with the given body children
fn document(children: &[(&str, &[(&str, &str)])]) -> (Document, Vec<NodeId>) {
    let mut doc = Document::empty("file:///test.html");
    let tree = doc.tree_mut();
    let html = tree.create_element("html");
    let head = tree.create_element("head");
    let body = tree.create_element("body");
    tree.append_child(tree.root(), html);
    tree.append_child(html, head);
    tree.append_child(html, body);

    let mut ids = Vec::new();
    for (tag, attrs) in children {
        let mut data = ElementData::new(tag);
        for (name, value) in *attrs {
            data.set_attr(name, *value);
        }
        let id = tree.create_element_with(data);
        tree.append_child(body, id);
        ids.push(id);
    }
    doc.finalize();
    (doc, ids)
}

// ============================================================================
// PARSING
// ============================================================================

#[test]
fn test_parse_empty() {
    let stylesheet = CssParser::new().parse("").unwrap();
    assert_eq!(stylesheet.len(), 0);
}

#[test]
fn test_parse_multiple_rules() {
    let css = r#"
        .foo { color: red; }
        .bar { background: blue; }
        #baz { display: flex; }
    "#;
    let stylesheet = parse_stylesheet(css).unwrap();
    assert_eq!(stylesheet.len(), 3);
}

#[test]
fn test_parse_complex_selectors() {
    let css = r#"
        div.container > p.text { color: black; }
        ul li a:hover { color: blue; }
        input[type="text"] { border: 1px solid; }
        h1, h2, h3 { margin: 0; }
    "#;
    let stylesheet = CssParser::new().parse(css).unwrap();
    assert_eq!(stylesheet.len(), 4);
    assert_eq!(stylesheet.rules[3].selectors.0.len(), 3);
}

#[test]
fn test_parse_recovers_from_bad_rule() {
    let css = "p { color: red; } @@@ { } div { color: blue; }";
    let stylesheet = CssParser::new().parse(css).unwrap();
    assert!(stylesheet.len() >= 1);
}

#[test]
fn test_parse_colors() {
    for (input, expected) in [
        ("#f00", Rgba::rgb(255, 0, 0)),
        ("#ff0000", Rgba::rgb(255, 0, 0)),
        ("blue", Rgba::rgb(0, 0, 255)),
        ("rgb(255, 0, 0)", Rgba::rgb(255, 0, 0)),
        ("rgba(255, 0, 0, 0.5)", Rgba::rgba(255, 0, 0, 128)),
    ] {
        assert_eq!(parse_color(input), Ok(expected), "parsing {input}");
    }
}

// ============================================================================
// COMPUTED STYLE
// ============================================================================

#[test]
fn test_hidden_attribute() {
    let (doc, ids) = document(&[("input", &[("hidden", "")]), ("input", &[("type", "HIDDEN")])]);
    let styles = StyleResolver::new().compute_all(&doc);

    assert_eq!(styles.computed_style(ids[0]).display(), "none");
    assert_eq!(styles.computed_style(ids[1]).display(), "none");
}

#[test]
fn test_visibility_inherits_from_body() {
    let (doc, ids) = document(&[("p", &[])]);
    let mut resolver = StyleResolver::new();
    resolver.add_stylesheet(parse_stylesheet("body { visibility: hidden }").unwrap());
    let styles = resolver.compute_all(&doc);

    assert_eq!(styles.computed_style(ids[0]).visibility(), "hidden");
    assert!(styles.computed_style(ids[0]).is_hidden());
}

#[test]
fn test_later_stylesheet_wins() {
    let (doc, ids) = document(&[("p", &[("class", "note")])]);
    let mut resolver = StyleResolver::new();
    resolver.add_stylesheet(parse_stylesheet(".note { color: red }").unwrap());
    resolver.add_stylesheet(parse_stylesheet(".note { color: lime }").unwrap());
    let styles = resolver.compute_all(&doc);

    assert_eq!(styles.computed_style(ids[0]).get("color"), Some("rgb(0, 255, 0)"));
}

#[test]
fn test_background_shorthand_computes_background_color() {
    let (doc, ids) = document(&[("div", &[("id", "hero")])]);
    let mut resolver = StyleResolver::new();
    resolver.add_stylesheet(parse_stylesheet("#hero { background: #000 }").unwrap());
    let styles = resolver.compute_all(&doc);

    assert_eq!(styles.computed_style(ids[0]).get("background-color"), Some("rgb(0, 0, 0)"));
}

#[test]
fn test_inherit_keyword() {
    let (doc, ids) = document(&[("div", &[])]);
    let mut resolver = StyleResolver::new();
    resolver.add_stylesheet(
        parse_stylesheet("body { background-color: navy } div { background-color: inherit }").unwrap(),
    );
    let styles = resolver.compute_all(&doc);

    assert_eq!(styles.computed_style(ids[0]).get("background-color"), Some("rgb(0, 0, 128)"));
}

#[test]
fn test_unknown_node_gets_initial_style() {
    let (doc, _) = document(&[]);
    let styles = StyleResolver::new().compute_all(&doc);
    let style = styles.computed_style(NodeId::ROOT);

    assert_eq!(style.get("color"), None);
    assert_eq!(style.get("display"), Some("inline"));
    assert_eq!(style.get("visibility"), Some("visible"));
    assert_eq!(style.get("font-size"), None);
}
