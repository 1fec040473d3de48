//! Edge case tests for bri11iant-html
//!
//! Malformed markup must still produce a document whose elements can be
//! found again in the source text.

use bri11iant_html::{HtmlParser, resolve_markup, ResourcePathResolver};

// ============================================================================
// EMPTY AND MINIMAL INPUT
// ============================================================================

#[test]
fn test_parse_empty() {
    let doc = HtmlParser::new().parse("").unwrap();
    assert!(doc.document_element().is_valid(), "html is synthesized for empty input");
    assert!(doc.head().is_valid());
    assert!(doc.body().is_valid());
}

#[test]
fn test_parse_null_bytes() {
    let doc = HtmlParser::new().parse("Hello\0World").unwrap();
    assert!(doc.tree().len() > 1);
}

#[test]
fn test_parse_only_whitespace() {
    let doc = HtmlParser::new().parse("   \t\n\r\n   ").unwrap();
    assert!(doc.body().is_valid());
}

#[test]
fn test_parse_only_doctype() {
    let doc = HtmlParser::new().parse("<!DOCTYPE html>").unwrap();
    assert_eq!(doc.elements().count(), 3);
}

// ============================================================================
// MALFORMED HTML
// ============================================================================

#[test]
fn test_parse_unclosed_tags() {
    let doc = HtmlParser::new().parse("<div><p><span>text").unwrap();
    let span = doc.elements_by_tag("span").next().unwrap();
    assert_eq!(span.outer_html(), "<span>text</span>");
}

#[test]
fn test_parse_mismatched_tags() {
    let doc = HtmlParser::new().parse("<div><p></div></p>").unwrap();
    assert_eq!(doc.elements_by_tag("p").count(), 2, "stray </p> creates an empty paragraph");
}

#[test]
fn test_parse_orphan_closing_tag() {
    let doc = HtmlParser::new().parse("</div>").unwrap();
    assert_eq!(doc.elements_by_tag("div").count(), 0);
}

#[test]
fn test_parse_nested_paragraphs_are_siblings() {
    let doc = HtmlParser::new().parse("<p><p><p>text").unwrap();
    let body = doc.element(doc.body()).unwrap();
    assert_eq!(body.child_elements().count(), 3);
}

#[test]
fn test_unquoted_attributes_serialize_quoted() {
    let doc = HtmlParser::new().parse("<img src=a.png alt=cat>").unwrap();
    let img = doc.elements_by_tag("img").next().unwrap();
    assert_eq!(img.outer_html(), r#"<img src="a.png" alt="cat">"#);
}

#[test]
fn test_duplicate_attributes_keep_first() {
    let doc = HtmlParser::new().parse(r#"<div role="main" role="bogus"></div>"#).unwrap();
    let div = doc.elements_by_tag("div").next().unwrap();
    assert_eq!(div.attr("role"), Some("main"));
    assert_eq!(div.data().attrs.len(), 1);
}

#[test]
fn test_entities_are_decoded() {
    let doc = HtmlParser::new().parse("<p title=\"a&amp;b\">x&nbsp;y</p>").unwrap();
    let p = doc.elements_by_tag("p").next().unwrap();
    assert_eq!(p.attr("title"), Some("a&b"));
    assert_eq!(p.text_content(), "x\u{a0}y");
    assert_eq!(p.outer_html(), "<p title=\"a&amp;b\">x&nbsp;y</p>");
}

// ============================================================================
// UNICODE
// ============================================================================

#[test]
fn test_unicode_text_and_attributes() {
    let doc = HtmlParser::new().parse("<img alt=\"日本語 🐱\"><p>Ünïcödé</p>").unwrap();
    let img = doc.elements_by_tag("img").next().unwrap();
    assert_eq!(img.attr("alt"), Some("日本語 🐱"));
    assert_eq!(doc.elements_by_tag("p").next().unwrap().text_content(), "Ünïcödé");
}

// ============================================================================
// RESOLVER EDGE CASES
// ============================================================================

#[test]
fn test_resolve_markup_without_directory() {
    let out = resolve_markup("<img src=\"x.png\">", "untitled-1").unwrap();
    assert!(out.contains(r#"<img src="x.png">"#));
}

#[test]
fn test_resolve_empty_src_skipped() {
    let mut doc = HtmlParser::new().parse("<img src=\"\"><script></script>").unwrap();
    let rewritten = ResourcePathResolver::from_document_uri("file:///x/y.html").rewrite(&mut doc);
    assert_eq!(rewritten, 0);
}

#[test]
fn test_resolve_uppercase_scheme() {
    let resolver = ResourcePathResolver::from_document_uri("file:///x/y.html");
    assert_eq!(resolver.resolve("HTTPS://host/a.css"), None);
    assert_eq!(resolver.resolve("DATA:text/plain,hi"), None);
}
