//! Error types for tree navigation and mutation.

use crate::NodeId;

/// Failures surfaced by [`Document`](crate::Document) and [`Tag`](crate::Tag)
/// operations.
///
/// Navigation methods fail fast with one of the not-found variants; the
/// `try_*` and `has_*` forms convert the same conditions into `None`/`false`
/// instead. The circularity variants are never downgraded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// The id does not name a live node in this document (never allocated,
    /// or released by a delete).
    #[error("no node with id {0:?} exists in this document")]
    NodeNotFound(NodeId),

    /// The node exists but is not a child of the given parent.
    #[error("node {child:?} is not a child of node {parent:?}")]
    ChildNotFound {
        /// The container that was searched.
        parent: NodeId,
        /// The id that was not among its children.
        child: NodeId,
    },

    /// A first/last child accessor was called on a childless node.
    #[error("node {0:?} has no children")]
    NoChildren(NodeId),

    /// An indexed child accessor ran past the end of the child list.
    #[error("node {parent:?} has no child at index {index}")]
    NoChildAtIndex {
        /// The container that was indexed into.
        parent: NodeId,
        /// The zero-based index that was requested.
        index: usize,
    },

    /// The node has no sibling in the requested direction.
    #[error("node {0:?} has no sibling in the requested direction")]
    SiblingNotFound(NodeId),

    /// A sibling accessor was called on a detached node.
    #[error("node {0:?} has no parent")]
    ParentNotFound(NodeId),

    /// No ancestor (including the starting node) carries the requested tag.
    #[error("no ancestor of node {id:?} has tag name '{tag}'")]
    AncestorNotFound {
        /// The node the upward search started from.
        id: NodeId,
        /// The tag name that was searched for.
        tag: String,
    },

    /// Fail-fast attribute lookup on a tag that lacks the attribute.
    #[error("tag '{tag}' has no attribute named '{name}'")]
    AttributeNotFound {
        /// Name of the tag that was inspected.
        tag: String,
        /// The attribute that is absent.
        name: String,
    },

    /// A text operation was applied to an element node.
    #[error("node {0:?} is not a text node")]
    NotAText(NodeId),

    /// An element operation (tag or attribute access) was applied to a
    /// text node.
    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),

    /// The insertion would make a node its own ancestor.
    #[error("inserting node {child:?} under node {parent:?} would create a cycle")]
    Circular {
        /// The intended parent.
        parent: NodeId,
        /// The node whose insertion was refused.
        child: NodeId,
    },

    /// A sibling walk revisited a node, meaning the links were corrupted
    /// through direct field access.
    #[error("the child list of node {0:?} revisited node {1:?}; sibling links are corrupt")]
    CorruptSiblings(NodeId, NodeId),
}
