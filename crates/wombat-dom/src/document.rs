//! The arena-backed document tree.
//!
//! All nodes of one parsed document live in a single [`Document`] arena and
//! are addressed by [`NodeId`] indices. Sibling order is defined solely by
//! the per-node `prev_sibling`/`next_sibling` links threaded from each
//! parent's `first_child`; the arena's storage order is creation order and
//! carries no tree meaning.

use std::collections::HashSet;

use crate::encoding::Encoding;
use crate::error::DomError;
use crate::node::{NodeData, TextData};
use crate::tag::{Attribute, Tag};

/// A type-safe index into a [`Document`] arena.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
///
/// Ids are handed out monotonically by the owning document and are never
/// reused, even after the node is deleted. An id is meaningless outside the
/// document that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The root container is always at index 0.
    pub const ROOT: Self = Self(0);

    /// The raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One arena slot: the node payload plus its tree links.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Node is an abstract interface that is used by all nodes in a tree."
///
/// The fields are public for inspection and for deliberate low-level
/// surgery; the [`Document`] mutation methods keep them consistent, and the
/// checked walks ([`Document::children`]) exist to catch hand-broken links.
#[derive(Debug, Clone)]
pub struct Node {
    /// The element or text payload.
    pub data: NodeData,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-previous-sibling)
    /// "An object A's previous sibling is the object immediately preceding A
    /// in the children of A's parent."
    pub prev_sibling: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-next-sibling)
    /// "An object A's next sibling is the object immediately following A
    /// in the children of A's parent."
    pub next_sibling: Option<NodeId>,

    /// Head of this node's child list.
    pub first_child: Option<NodeId>,

    /// Tail of this node's child list.
    pub last_child: Option<NodeId>,

    /// Number of direct children.
    pub child_count: usize,
}

impl Node {
    const fn detached(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            prev_sibling: None,
            next_sibling: None,
            first_child: None,
            last_child: None,
            child_count: 0,
        }
    }
}

/// Arena-based document tree with O(1) node access and O(1) splices.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
/// "The DOM represents a document as a tree."
///
/// Deleting a node tombstones its slot; the id is never handed out again
/// and every accessor reports the node as missing from then on. A fresh
/// document holds one live node: the root container (tag name `root`).
#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Option<Node>>,
    live: usize,
    encoding: Option<Encoding>,
}

impl Document {
    /// Create a document holding only the root container.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a document with arena capacity pre-sized for roughly
    /// `capacity` nodes (a parser passes a hint derived from input length).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity.max(1));
        slots.push(Some(Node::detached(NodeData::Element(Tag::new("root")))));
        Self {
            slots,
            live: 1,
            encoding: None,
        }
    }

    /// The root container's id.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of live nodes (tombstoned slots excluded).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.live
    }

    /// Whether no live node remains (only possible after deleting the root).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Whether `id` names a live node of this document.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Get a node by its id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Get a mutable reference to a node by its id.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    fn node(&self, id: NodeId) -> Result<&Node, DomError> {
        self.get(id).ok_or(DomError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DomError> {
        self.get_mut(id).ok_or(DomError::NodeNotFound(id))
    }

    /// Allocate a new detached node and return its id.
    pub fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.slots.len());
        self.slots.push(Some(Node::detached(data)));
        self.live += 1;
        id
    }

    // ===== Structure mutation =====

    /// Append `child` as the last child of `parent`.
    ///
    /// Returns `Ok(false)` without changing anything when `child` already is
    /// a child of `parent`. A node attached elsewhere is detached from its
    /// old parent first.
    ///
    /// # Errors
    /// [`DomError::NodeNotFound`] for a dead id;
    /// [`DomError::Circular`] when `child == parent` or `child` is an
    /// ancestor of `parent`.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<bool, DomError> {
        self.add_child_before(parent, child, None)
    }

    /// Append `child` under `parent`, or splice it immediately before the
    /// existing child `before` when given.
    ///
    /// Returns `Ok(false)` when `child` already is a child of `parent` or
    /// when `before` is not one of `parent`'s children.
    ///
    /// # Errors
    /// [`DomError::NodeNotFound`] for a dead id;
    /// [`DomError::Circular`] when the insertion would make a node its own
    /// ancestor.
    pub fn add_child_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        before: Option<NodeId>,
    ) -> Result<bool, DomError> {
        let _ = self.node(parent)?;
        if child == parent {
            return Err(DomError::Circular { parent, child });
        }
        if self.is_ancestor_of(child, parent) {
            return Err(DomError::Circular { parent, child });
        }
        if self.node(child)?.parent == Some(parent) {
            return Ok(false);
        }
        if let Some(anchor) = before
            && !self.is_child(parent, anchor)
        {
            return Ok(false);
        }
        self.detach(child)?;
        self.link_before(parent, child, before)?;
        Ok(true)
    }

    /// Splice `child` in directly before the existing child `reference`.
    ///
    /// # Errors
    /// As [`Self::add_child_before`].
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: NodeId,
    ) -> Result<bool, DomError> {
        self.add_child_before(parent, child, Some(reference))
    }

    /// Splice `child` in directly after the existing child `reference`.
    ///
    /// # Errors
    /// As [`Self::add_child_before`].
    pub fn insert_after(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: NodeId,
    ) -> Result<bool, DomError> {
        let _ = self.node(parent)?;
        if !self.is_child(parent, reference) {
            return Ok(false);
        }
        match self.node(reference)?.next_sibling {
            Some(next) => self.add_child_before(parent, child, Some(next)),
            None => self.add_child_before(parent, child, None),
        }
    }

    /// Unlink `child` from `parent`. The node stays alive, detached.
    /// Not being a child in the first place is a no-op.
    ///
    /// # Errors
    /// [`DomError::NodeNotFound`] when `parent` is dead.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let _ = self.node(parent)?;
        if !self.is_child(parent, child) {
            return Ok(());
        }
        self.detach(child)
    }

    /// Substitute `new` at `old`'s exact position under `parent`; `old`
    /// becomes detached (still alive).
    ///
    /// # Errors
    /// [`DomError::ChildNotFound`] when `old` is not a child of `parent`;
    /// [`DomError::NodeNotFound`] / [`DomError::Circular`] as for insertion.
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        old: NodeId,
        new: NodeId,
    ) -> Result<(), DomError> {
        let _ = self.node(parent)?;
        let _ = self.node(new)?;
        if !self.is_child(parent, old) {
            return Err(DomError::ChildNotFound { parent, child: old });
        }
        if new == parent || self.is_ancestor_of(new, parent) {
            return Err(DomError::Circular { parent, child: new });
        }
        if new == old {
            return Ok(());
        }
        self.detach(new)?;
        self.link_before(parent, new, Some(old))?;
        self.detach(old)
    }

    /// Detach `id` and release it and its whole subtree. The freed ids are
    /// never reused; accessors report the nodes as missing afterwards.
    ///
    /// # Errors
    /// [`DomError::NodeNotFound`] when `id` is already dead.
    pub fn delete(&mut self, id: NodeId) -> Result<(), DomError> {
        let _ = self.node(id)?;
        self.detach(id)?;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            stack.extend(self.raw_children(current));
            if let Some(slot) = self.slots.get_mut(current.0)
                && slot.take().is_some()
            {
                self.live -= 1;
            }
        }
        Ok(())
    }

    /// Unlink a node from its parent, stitching the neighbor links.
    fn detach(&mut self, id: NodeId) -> Result<(), DomError> {
        let (parent, prev, next) = {
            let node = self.node(id)?;
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        let Some(parent) = parent else {
            return Ok(());
        };
        match prev {
            Some(before) => self.node_mut(before)?.next_sibling = next,
            None => self.node_mut(parent)?.first_child = next,
        }
        match next {
            Some(after) => self.node_mut(after)?.prev_sibling = prev,
            None => self.node_mut(parent)?.last_child = prev,
        }
        self.node_mut(parent)?.child_count -= 1;
        let node = self.node_mut(id)?;
        node.parent = None;
        node.prev_sibling = None;
        node.next_sibling = None;
        Ok(())
    }

    /// Link surgery only. `child` must be detached and all ids validated.
    fn link_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        before: Option<NodeId>,
    ) -> Result<(), DomError> {
        match before {
            None => {
                let old_tail = self.node(parent)?.last_child;
                {
                    let node = self.node_mut(child)?;
                    node.parent = Some(parent);
                    node.prev_sibling = old_tail;
                    node.next_sibling = None;
                }
                if let Some(tail) = old_tail {
                    self.node_mut(tail)?.next_sibling = Some(child);
                }
                let node = self.node_mut(parent)?;
                node.last_child = Some(child);
                if node.first_child.is_none() {
                    node.first_child = Some(child);
                }
                node.child_count += 1;
            }
            Some(anchor) => {
                let anchor_prev = self.node(anchor)?.prev_sibling;
                {
                    let node = self.node_mut(child)?;
                    node.parent = Some(parent);
                    node.prev_sibling = anchor_prev;
                    node.next_sibling = Some(anchor);
                }
                self.node_mut(anchor)?.prev_sibling = Some(child);
                match anchor_prev {
                    Some(before_anchor) => {
                        self.node_mut(before_anchor)?.next_sibling = Some(child);
                    }
                    None => self.node_mut(parent)?.first_child = Some(child),
                }
                self.node_mut(parent)?.child_count += 1;
            }
        }
        Ok(())
    }

    // ===== Navigation =====

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// First child, failing fast.
    ///
    /// # Errors
    /// [`DomError::NodeNotFound`] / [`DomError::NoChildren`].
    pub fn first_child(&self, id: NodeId) -> Result<NodeId, DomError> {
        self.node(id)?.first_child.ok_or(DomError::NoChildren(id))
    }

    /// First child, or `None`.
    #[must_use]
    pub fn try_first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.first_child)
    }

    /// Last child, failing fast.
    ///
    /// # Errors
    /// [`DomError::NodeNotFound`] / [`DomError::NoChildren`].
    pub fn last_child(&self, id: NodeId) -> Result<NodeId, DomError> {
        self.node(id)?.last_child.ok_or(DomError::NoChildren(id))
    }

    /// Last child, or `None`.
    #[must_use]
    pub fn try_last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.last_child)
    }

    /// Zero-based indexed child, failing fast.
    ///
    /// # Errors
    /// [`DomError::NodeNotFound`] / [`DomError::NoChildAtIndex`].
    pub fn nth_child(&self, parent: NodeId, index: usize) -> Result<NodeId, DomError> {
        let _ = self.node(parent)?;
        self.try_nth_child(parent, index)
            .ok_or(DomError::NoChildAtIndex { parent, index })
    }

    /// Zero-based indexed child, or `None`.
    #[must_use]
    pub fn try_nth_child(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.child_iter(parent).nth(index)
    }

    /// The child following `child` in `parent`'s child list.
    ///
    /// # Errors
    /// [`DomError::ChildNotFound`] when `child` is not a child of `parent`;
    /// [`DomError::SiblingNotFound`] at the tail.
    pub fn next_child(&self, parent: NodeId, child: NodeId) -> Result<NodeId, DomError> {
        let _ = self.node(parent)?;
        if !self.is_child(parent, child) {
            return Err(DomError::ChildNotFound { parent, child });
        }
        self.node(child)?.next_sibling.ok_or(DomError::SiblingNotFound(child))
    }

    /// The child preceding `child` in `parent`'s child list.
    ///
    /// # Errors
    /// [`DomError::ChildNotFound`] when `child` is not a child of `parent`;
    /// [`DomError::SiblingNotFound`] at the head.
    pub fn previous_child(&self, parent: NodeId, child: NodeId) -> Result<NodeId, DomError> {
        let _ = self.node(parent)?;
        if !self.is_child(parent, child) {
            return Err(DomError::ChildNotFound { parent, child });
        }
        self.node(child)?.prev_sibling.ok_or(DomError::SiblingNotFound(child))
    }

    /// Next sibling, failing fast.
    ///
    /// # Errors
    /// [`DomError::ParentNotFound`] on a detached node;
    /// [`DomError::SiblingNotFound`] at the tail.
    pub fn next_sibling(&self, id: NodeId) -> Result<NodeId, DomError> {
        let node = self.node(id)?;
        if node.parent.is_none() {
            return Err(DomError::ParentNotFound(id));
        }
        node.next_sibling.ok_or(DomError::SiblingNotFound(id))
    }

    /// Previous sibling, failing fast.
    ///
    /// # Errors
    /// [`DomError::ParentNotFound`] on a detached node;
    /// [`DomError::SiblingNotFound`] at the head.
    pub fn previous_sibling(&self, id: NodeId) -> Result<NodeId, DomError> {
        let node = self.node(id)?;
        if node.parent.is_none() {
            return Err(DomError::ParentNotFound(id));
        }
        node.prev_sibling.ok_or(DomError::SiblingNotFound(id))
    }

    /// Next sibling, or `None`.
    #[must_use]
    pub fn try_next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Previous sibling, or `None`.
    #[must_use]
    pub fn try_previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Boolean probe for a following sibling; failures convert to `false`.
    #[must_use]
    pub fn has_next_sibling(&self, id: NodeId) -> bool {
        self.next_sibling(id).is_ok()
    }

    /// Boolean probe for a preceding sibling; failures convert to `false`.
    #[must_use]
    pub fn has_previous_sibling(&self, id: NodeId) -> bool {
        self.previous_sibling(id).is_ok()
    }

    /// All children head to tail, with cycle detection.
    ///
    /// # Errors
    /// [`DomError::NodeNotFound`] for a dead id;
    /// [`DomError::CorruptSiblings`] when the walk revisits a node.
    pub fn children(&self, id: NodeId) -> Result<Vec<NodeId>, DomError> {
        let node = self.node(id)?;
        let mut seen = HashSet::new();
        let mut out = Vec::with_capacity(node.child_count);
        let mut current = node.first_child;
        while let Some(child) = current {
            if !seen.insert(child) {
                return Err(DomError::CorruptSiblings(id, child));
            }
            out.push(child);
            current = self.node(child)?.next_sibling;
        }
        Ok(out)
    }

    /// Whether `id` is a direct child of `parent`.
    #[must_use]
    pub fn is_child(&self, parent: NodeId, id: NodeId) -> bool {
        self.get(id).is_some_and(|n| n.parent == Some(parent))
    }

    /// Whether the node has at least one child.
    #[must_use]
    pub fn has_children(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|n| n.first_child.is_some())
    }

    /// Number of direct children (0 for a dead id).
    #[must_use]
    pub fn count_children(&self, id: NodeId) -> usize {
        self.get(id).map_or(0, |n| n.child_count)
    }

    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    /// "An object A is called a descendant of an object B, if either A is a
    /// child of B or A is a child of an object C that is a descendant of B."
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.parent(descendant);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// The inverse view of [`Self::is_descendant_of`].
    #[must_use]
    pub fn is_ancestor_of(&self, ancestor: NodeId, descendant: NodeId) -> bool {
        self.is_descendant_of(descendant, ancestor)
    }

    /// Walk upward looking for `target` among the ancestors of `id`.
    #[must_use]
    pub fn get_ancestor(&self, id: NodeId, target: NodeId) -> Option<NodeId> {
        self.ancestors(id).find(|&a| a == target)
    }

    /// The nearest node with the given tag name, starting at `id` itself and
    /// walking upward.
    ///
    /// # Errors
    /// [`DomError::NodeNotFound`] / [`DomError::AncestorNotFound`].
    pub fn ancestor_by_tag(&self, id: NodeId, tag: &str) -> Result<NodeId, DomError> {
        let _ = self.node(id)?;
        let tag = tag.to_ascii_lowercase();
        if self.tag_name(id) == Some(tag.as_str()) {
            return Ok(id);
        }
        self.ancestors(id)
            .find(|&a| self.tag_name(a) == Some(tag.as_str()))
            .ok_or(DomError::AncestorNotFound { id, tag })
    }

    /// Membership check scoped to a subtree: `Some(id)` when `id` is `root`
    /// itself or one of its live descendants.
    #[must_use]
    pub fn find_in_subtree(&self, root: NodeId, id: NodeId) -> Option<NodeId> {
        if !self.contains(id) || !self.contains(root) {
            return None;
        }
        if id == root || self.is_descendant_of(id, root) {
            return Some(id);
        }
        None
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            doc: self,
            current: self.parent(id),
        }
    }

    /// Iterate over the children of a node head to tail, following the raw
    /// sibling links (use [`Self::children`] for the cycle-checked form).
    #[must_use]
    pub fn child_iter(&self, id: NodeId) -> ChildIterator<'_> {
        ChildIterator {
            doc: self,
            current: self.try_first_child(id),
        }
    }

    /// Iterate over the whole subtree below `id` in document order
    /// (pre-order, `id` itself excluded).
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        let mut stack = self.raw_children(id);
        stack.reverse();
        DescendantIterator { doc: self, stack }
    }

    /// Child ids head to tail; silently stops on a repeated id so callers
    /// that cannot fail still terminate on corrupt links.
    fn raw_children(&self, id: NodeId) -> Vec<NodeId> {
        let Some(node) = self.get(id) else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        let mut out = Vec::with_capacity(node.child_count);
        let mut current = node.first_child;
        while let Some(child) = current {
            if !seen.insert(child) {
                break;
            }
            out.push(child);
            current = self.get(child).and_then(|n| n.next_sibling);
        }
        out
    }

    // ===== Payload access =====

    /// The element's tag if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&Tag> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element(tag) => Some(tag),
            NodeData::Text(_) => None,
        })
    }

    /// Mutable element tag access.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut Tag> {
        self.get_mut(id).and_then(|n| match &mut n.data {
            NodeData::Element(tag) => Some(tag),
            NodeData::Text(_) => None,
        })
    }

    /// The text payload if this node is a text run.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&TextData> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Text(text) => Some(text),
            NodeData::Element(_) => None,
        })
    }

    /// The tag name used for matching: the element name, or `"text"`.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(|n| n.data.tag_name())
    }

    /// Fail-fast element tag access.
    ///
    /// # Errors
    /// [`DomError::NodeNotFound`] / [`DomError::NotAnElement`].
    pub fn tag(&self, id: NodeId) -> Result<&Tag, DomError> {
        match &self.node(id)?.data {
            NodeData::Element(tag) => Ok(tag),
            NodeData::Text(_) => Err(DomError::NotAnElement(id)),
        }
    }

    /// Fail-fast mutable element tag access.
    ///
    /// # Errors
    /// [`DomError::NodeNotFound`] / [`DomError::NotAnElement`].
    pub fn tag_mut(&mut self, id: NodeId) -> Result<&mut Tag, DomError> {
        match &mut self.node_mut(id)?.data {
            NodeData::Element(tag) => Ok(tag),
            NodeData::Text(_) => Err(DomError::NotAnElement(id)),
        }
    }

    /// Replace the element's tag wholesale.
    ///
    /// # Errors
    /// [`DomError::NodeNotFound`] / [`DomError::NotAnElement`].
    pub fn set_tag(&mut self, id: NodeId, tag: Tag) -> Result<(), DomError> {
        *self.tag_mut(id)? = tag;
        Ok(())
    }

    /// An attribute's value; `None` when the node is not an element, the
    /// attribute is absent, or it is valueless.
    #[must_use]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.as_element(id).and_then(|tag| tag.attribute_value(name))
    }

    /// Whether the element carries the attribute, even valueless.
    #[must_use]
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.as_element(id).is_some_and(|tag| tag.has_attribute(name))
    }

    /// Every attribute of an element, in source order.
    ///
    /// # Errors
    /// [`DomError::NodeNotFound`] / [`DomError::NotAnElement`].
    pub fn attributes(&self, id: NodeId) -> Result<&[(String, Attribute)], DomError> {
        Ok(self.tag(id)?.attributes())
    }

    /// Set one attribute on an element.
    ///
    /// # Errors
    /// [`DomError::NodeNotFound`] / [`DomError::NotAnElement`].
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        attribute: Attribute,
    ) -> Result<(), DomError> {
        self.tag_mut(id)?.set_attribute(name, attribute);
        Ok(())
    }

    /// Remove one attribute from an element, returning it if present.
    ///
    /// # Errors
    /// [`DomError::NodeNotFound`] / [`DomError::NotAnElement`].
    pub fn remove_attribute(
        &mut self,
        id: NodeId,
        name: &str,
    ) -> Result<Option<Attribute>, DomError> {
        Ok(self.tag_mut(id)?.remove_attribute(name))
    }

    // ===== Text and markup =====

    /// A text node's converted text, or the concatenated converted text of
    /// an element's direct text children.
    ///
    /// # Errors
    /// [`DomError::NodeNotFound`] / [`DomError::CorruptSiblings`].
    pub fn text(&self, id: NodeId) -> Result<String, DomError> {
        match &self.node(id)?.data {
            NodeData::Text(text) => Ok(text.rendered(self.encoding.as_ref())),
            NodeData::Element(_) => {
                let mut out = String::new();
                for child in self.children(id)? {
                    if let Some(text) = self.as_text(child) {
                        out.push_str(&text.rendered(self.encoding.as_ref()));
                    }
                }
                Ok(out)
            }
        }
    }

    /// The concatenated converted text of every descendant text node, in
    /// document order.
    ///
    /// # Errors
    /// [`DomError::NodeNotFound`] for a dead id.
    pub fn inner_text(&self, id: NodeId) -> Result<String, DomError> {
        match &self.node(id)?.data {
            NodeData::Text(text) => Ok(text.rendered(self.encoding.as_ref())),
            NodeData::Element(_) => {
                let mut out = String::new();
                for descendant in self.descendants(id) {
                    if let Some(text) = self.as_text(descendant) {
                        out.push_str(&text.rendered(self.encoding.as_ref()));
                    }
                }
                Ok(out)
            }
        }
    }

    /// Replace a text node's payload, dropping its conversion cache.
    ///
    /// # Errors
    /// [`DomError::NodeNotFound`] / [`DomError::NotAText`].
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<(), DomError> {
        match &mut self.node_mut(id)?.data {
            NodeData::Text(data) => {
                data.set(text);
                Ok(())
            }
            NodeData::Element(_) => Err(DomError::NotAText(id)),
        }
    }

    /// Render the node back to markup: start tag, children, end tag for
    /// elements (children skipped when self-closing); converted text for
    /// text runs.
    ///
    /// # Errors
    /// [`DomError::NodeNotFound`] / [`DomError::CorruptSiblings`].
    pub fn outer_markup(&self, id: NodeId) -> Result<String, DomError> {
        match &self.node(id)?.data {
            NodeData::Text(text) => Ok(text.rendered(self.encoding.as_ref())),
            NodeData::Element(tag) => {
                let mut out = tag.opening_markup();
                if !tag.is_self_closing() {
                    for child in self.children(id)? {
                        out.push_str(&self.outer_markup(child)?);
                    }
                    out.push_str(&tag.closing_markup());
                }
                Ok(out)
            }
        }
    }

    /// Render only the node's contents (children) back to markup.
    ///
    /// # Errors
    /// [`DomError::NodeNotFound`] / [`DomError::CorruptSiblings`].
    pub fn inner_markup(&self, id: NodeId) -> Result<String, DomError> {
        match &self.node(id)?.data {
            NodeData::Text(text) => Ok(text.rendered(self.encoding.as_ref())),
            NodeData::Element(_) => {
                let mut out = String::new();
                for child in self.children(id)? {
                    out.push_str(&self.outer_markup(child)?);
                }
                Ok(out)
            }
        }
    }

    // ===== Encoding =====

    /// The installed charset conversion, if any.
    #[must_use]
    pub const fn encoding(&self) -> Option<&Encoding> {
        self.encoding.as_ref()
    }

    /// Install a charset conversion for the whole tree, dropping every text
    /// node's conversion cache.
    pub fn install_encoding(&mut self, encoding: Encoding) {
        self.encoding = Some(encoding);
        for slot in self.slots.iter_mut().flatten() {
            if let NodeData::Text(text) = &mut slot.data {
                text.invalidate();
            }
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    doc: &'a Document,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.doc.parent(id);
        Some(id)
    }
}

/// Iterator over the children of one node, head to tail.
pub struct ChildIterator<'a> {
    doc: &'a Document,
    current: Option<NodeId>,
}

impl Iterator for ChildIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.doc.try_next_sibling(id);
        Some(id)
    }
}

/// Pre-order iterator over a node's subtree (the node itself excluded).
pub struct DescendantIterator<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let mut kids = self.doc.raw_children(id);
        kids.reverse();
        self.stack.extend(kids);
        Some(id)
    }
}
