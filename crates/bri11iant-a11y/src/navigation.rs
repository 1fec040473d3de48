//! Landmark heuristics
//!
//! Locates the main content and the primary navigation of a page, either
//! from explicit `<main>`/`<nav>` landmarks or from link density.

use std::collections::VecDeque;

use bri11iant_dom::{Document, ElementRef, NodeId};

/// Minimum number of links for an element to count as navigation
const MIN_NAVIGATION_LINKS: usize = 3;

/// The single `<main>`, or the document element when there is none.
/// `None` when the page has more than one `<main>`.
pub fn detect_main_content(doc: &Document) -> Option<NodeId> {
    match single(doc, "main") {
        Landmark::One(id) => Some(id),
        Landmark::Many => None,
        Landmark::Absent => doc.first_element_child(),
    }
}

/// The single `<nav>`, or the shallowest link-dominated element.
/// `None` when the page has more than one `<nav>` or nothing qualifies.
pub fn detect_navigation_content(doc: &Document) -> Option<NodeId> {
    match single(doc, "nav") {
        Landmark::One(id) => Some(id),
        Landmark::Many => None,
        Landmark::Absent => link_dense_element(doc),
    }
}

/// Pre-order walk from `<body>`: true iff `main` comes before `nav`
pub fn is_main_before_nav(doc: &Document, main: NodeId, nav: NodeId) -> bool {
    let body = doc.body();
    if !body.is_valid() {
        return false;
    }

    std::iter::once(body)
        .chain(doc.tree().descendants(body))
        .find(|&id| id == main || id == nav)
        .is_some_and(|id| id == main)
}

enum Landmark {
    Absent,
    One(NodeId),
    Many,
}

fn single(doc: &Document, tag: &str) -> Landmark {
    let mut found = doc.elements_by_tag(tag);
    match (found.next(), found.next()) {
        (None, _) => Landmark::Absent,
        (Some(e), None) => Landmark::One(e.id()),
        (Some(_), Some(_)) => Landmark::Many,
    }
}

fn visible_len(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

fn is_hyperlink(elem: &ElementRef<'_>) -> bool {
    elem.is("a") && elem.attr("href").is_some_and(|href| !href.is_empty())
}

fn is_link_dense(elem: &ElementRef<'_>) -> bool {
    let mut links = 0;
    let mut link_text = 0;
    for link in elem.descendant_elements().filter(is_hyperlink) {
        links += 1;
        link_text += visible_len(&link.text_content());
    }

    links >= MIN_NAVIGATION_LINKS && visible_len(&elem.text_content()) <= link_text
}

fn link_dense_element(doc: &Document) -> Option<NodeId> {
    let tree = doc.tree();
    let mut queue: VecDeque<ElementRef<'_>> = tree
        .element_children(NodeId::ROOT)
        .filter_map(|id| doc.element(id))
        .collect();

    while let Some(elem) = queue.pop_front() {
        if is_link_dense(&elem) {
            tracing::debug!(tag = elem.tag(), "navigation inferred from link density");
            return Some(elem.id());
        }
        queue.extend(elem.child_elements());
    }
    None
}
