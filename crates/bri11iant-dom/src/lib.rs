//! bri11iant DOM - Document Object Model
//!
//! Arena-backed document tree used by the accessibility linter.
//! Nodes are addressed by [`NodeId`]; parent and sibling links are plain
//! indices into the arena, so the tree never owns a cycle.

mod node;
mod tree;
mod document;
mod element;
mod serialize;

pub use node::{Node, NodeData, ElementData, Attribute, Namespace};
pub use tree::{DomTree, Children, Descendants};
pub use document::Document;
pub use element::ElementRef;
pub use serialize::{serialize_outer, serialize_inner, serialize_document};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check whether this id points at a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
