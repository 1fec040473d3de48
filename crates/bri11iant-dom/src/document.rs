//! Document - High-level document API

use crate::{DomTree, ElementRef, NodeId};

/// HTML Document
#[derive(Debug, Clone)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Locate the <html>, <head> and <body> elements after the tree is built
    pub fn finalize(&mut self) {
        self.html_element = self
            .tree
            .element_children(NodeId::ROOT)
            .find(|&id| self.tree.element(id).is_some_and(|e| e.is("html")))
            .unwrap_or(NodeId::NONE);

        if self.html_element.is_valid() {
            for child in self.tree.element_children(self.html_element) {
                let Some(elem) = self.tree.element(child) else {
                    continue;
                };
                if elem.is("head") && !self.head_element.is_valid() {
                    self.head_element = child;
                } else if elem.is("body") && !self.body_element.is_valid() {
                    self.body_element = child;
                }
            }
        }

        tracing::trace!(
            nodes = self.tree.len(),
            has_head = self.head_element.is_valid(),
            has_body = self.body_element.is_valid(),
            "document finalized"
        );
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get document title (text of the first <title> in <head>)
    pub fn title(&self) -> String {
        if !self.head_element.is_valid() {
            return String::new();
        }
        self.tree
            .descendants(self.head_element)
            .find(|&id| self.tree.element(id).is_some_and(|e| e.is("title")))
            .map(|id| self.tree.text_content(id))
            .unwrap_or_default()
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// First element child of the document node
    pub fn first_element_child(&self) -> Option<NodeId> {
        self.tree.element_children(NodeId::ROOT).next()
    }

    /// Borrow an element handle
    pub fn element(&self, id: NodeId) -> Option<ElementRef<'_>> {
        ElementRef::new(&self.tree, id)
    }

    /// All elements in document order
    pub fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> + '_ {
        self.tree
            .descendants(NodeId::ROOT)
            .filter_map(|id| ElementRef::new(&self.tree, id))
    }

    /// Elements with the given tag name, in document order
    pub fn elements_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.elements().filter(move |e| e.is(tag))
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<ElementRef<'_>> {
        self.elements().find(|e| e.attr("id") == Some(id))
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty("about:blank")
    }
}
