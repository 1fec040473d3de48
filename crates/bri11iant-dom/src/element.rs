//! Element handles
//!
//! [`ElementRef`] is a cheap, copyable view of one element inside a
//! [`DomTree`]. Validators only ever see elements through this type, so
//! they can read attributes and structure but never mutate the tree.

use crate::{DomTree, ElementData, NodeId, Namespace};

/// Borrowed view of an element node
#[derive(Debug, Clone, Copy)]
pub struct ElementRef<'a> {
    tree: &'a DomTree,
    id: NodeId,
    data: &'a ElementData,
}

impl<'a> ElementRef<'a> {
    /// Wrap `id` if it names an element
    pub fn new(tree: &'a DomTree, id: NodeId) -> Option<Self> {
        let data = tree.element(id)?;
        Some(Self { tree, id, data })
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'a DomTree {
        self.tree
    }

    pub fn data(&self) -> &'a ElementData {
        self.data
    }

    /// Local tag name
    pub fn tag(&self) -> &'a str {
        &self.data.name
    }

    pub fn namespace(&self) -> Namespace {
        self.data.namespace
    }

    /// Case-insensitive tag comparison
    pub fn is(&self, tag: &str) -> bool {
        self.data.is(tag)
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.data.attr(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.data.has_attr(name)
    }

    /// DOM `textContent`
    pub fn text_content(&self) -> String {
        self.tree.text_content(self.id)
    }

    /// DOM `innerHTML`
    pub fn inner_html(&self) -> String {
        crate::serialize_inner(self.tree, self.id)
    }

    /// DOM `outerHTML`; also the key used to find the element in source text
    pub fn outer_html(&self) -> String {
        crate::serialize_outer(self.tree, self.id)
    }

    pub fn parent_element(&self) -> Option<ElementRef<'a>> {
        let parent = self.tree.get(self.id)?.parent;
        ElementRef::new(self.tree, parent)
    }

    /// Direct element children
    pub fn child_elements(&self) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        let tree = self.tree;
        tree.element_children(self.id)
            .filter_map(move |id| ElementRef::new(tree, id))
    }

    /// Descendant elements in document order
    pub fn descendant_elements(&self) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        let tree = self.tree;
        tree.descendants(self.id)
            .filter_map(move |id| ElementRef::new(tree, id))
    }

    /// First descendant element with the given tag (`querySelector(tag)`)
    pub fn find_descendant(&self, tag: &str) -> Option<ElementRef<'a>> {
        self.descendant_elements().find(|e| e.is(tag))
    }

    /// Check whether `ancestor` contains this element
    pub fn is_descendant_of(&self, ancestor: NodeId) -> bool {
        self.tree.is_ancestor(ancestor, self.id)
    }
}

impl PartialEq for ElementRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for ElementRef<'_> {}
