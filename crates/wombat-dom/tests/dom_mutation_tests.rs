//! Tests for document tree mutation: add_child, insert_before/after,
//! remove_child, replace_child.

use wombat_dom::{Document, NodeData, NodeId, Tag};

/// Helper to allocate a detached element node and return its NodeId.
fn alloc_element(doc: &mut Document, tag: &str) -> NodeId {
    doc.alloc(NodeData::Element(Tag::new(tag)))
}

/// Attach `child` as last child of `parent`, panicking on any refusal.
fn attach(doc: &mut Document, parent: NodeId, child: NodeId) {
    assert!(doc.add_child(parent, child).unwrap());
}

// ========== add_child ==========

#[test]
fn test_add_child_builds_sibling_links() {
    let mut doc = Document::new();
    let parent = alloc_element(&mut doc, "div");
    attach(&mut doc, NodeId::ROOT, parent);

    let a = alloc_element(&mut doc, "a");
    let b = alloc_element(&mut doc, "b");
    attach(&mut doc, parent, a);
    attach(&mut doc, parent, b);

    assert_eq!(doc.children(parent).unwrap(), vec![a, b]);
    assert_eq!(doc.parent(a), Some(parent));
    assert_eq!(doc.try_next_sibling(a), Some(b));
    assert_eq!(doc.try_previous_sibling(b), Some(a));
    assert_eq!(doc.try_previous_sibling(a), None);
    assert_eq!(doc.try_next_sibling(b), None);
}

#[test]
fn test_add_child_duplicate_is_refused_quietly() {
    let mut doc = Document::new();
    let parent = alloc_element(&mut doc, "div");
    attach(&mut doc, NodeId::ROOT, parent);

    let child = alloc_element(&mut doc, "p");
    attach(&mut doc, parent, child);

    // Second add of the same child reports false and changes nothing
    assert!(!doc.add_child(parent, child).unwrap());
    assert_eq!(doc.count_children(parent), 1);
}

#[test]
fn test_add_child_reparents_from_old_parent() {
    let mut doc = Document::new();
    let old_parent = alloc_element(&mut doc, "div");
    let new_parent = alloc_element(&mut doc, "span");
    attach(&mut doc, NodeId::ROOT, old_parent);
    attach(&mut doc, NodeId::ROOT, new_parent);

    let child = alloc_element(&mut doc, "p");
    attach(&mut doc, old_parent, child);
    attach(&mut doc, new_parent, child);

    assert_eq!(doc.count_children(old_parent), 0);
    assert_eq!(doc.children(new_parent).unwrap(), vec![child]);
    assert_eq!(doc.parent(child), Some(new_parent));
}

#[test]
fn test_add_child_before_missing_anchor_is_refused_quietly() {
    let mut doc = Document::new();
    let parent = alloc_element(&mut doc, "div");
    attach(&mut doc, NodeId::ROOT, parent);

    let stranger = alloc_element(&mut doc, "b");
    let child = alloc_element(&mut doc, "p");

    // `stranger` is not a child of `parent`, so nothing happens
    assert!(!doc.add_child_before(parent, child, Some(stranger)).unwrap());
    assert_eq!(doc.count_children(parent), 0);
    assert_eq!(doc.parent(child), None);
}

// ========== remove_child ==========

#[test]
fn test_remove_child_single_child() {
    let mut doc = Document::new();
    let parent = alloc_element(&mut doc, "div");
    attach(&mut doc, NodeId::ROOT, parent);

    let child = alloc_element(&mut doc, "p");
    attach(&mut doc, parent, child);

    assert_eq!(doc.count_children(parent), 1);

    doc.remove_child(parent, child).unwrap();

    assert_eq!(doc.count_children(parent), 0);
    assert_eq!(doc.parent(child), None);
    assert_eq!(doc.try_previous_sibling(child), None);
    assert_eq!(doc.try_next_sibling(child), None);
    // The detached node is still alive
    assert!(doc.contains(child));
}

#[test]
fn test_remove_child_first_of_three() {
    let mut doc = Document::new();
    let parent = alloc_element(&mut doc, "div");
    attach(&mut doc, NodeId::ROOT, parent);

    let a = alloc_element(&mut doc, "a");
    let b = alloc_element(&mut doc, "b");
    let c = alloc_element(&mut doc, "c");
    attach(&mut doc, parent, a);
    attach(&mut doc, parent, b);
    attach(&mut doc, parent, c);

    doc.remove_child(parent, a).unwrap();

    // b is now first child, c is second
    assert_eq!(doc.children(parent).unwrap(), vec![b, c]);
    assert_eq!(doc.try_previous_sibling(b), None);
    assert_eq!(doc.try_next_sibling(b), Some(c));
    assert_eq!(doc.try_previous_sibling(c), Some(b));
}

#[test]
fn test_remove_child_middle_of_three() {
    let mut doc = Document::new();
    let parent = alloc_element(&mut doc, "div");
    attach(&mut doc, NodeId::ROOT, parent);

    let a = alloc_element(&mut doc, "a");
    let b = alloc_element(&mut doc, "b");
    let c = alloc_element(&mut doc, "c");
    attach(&mut doc, parent, a);
    attach(&mut doc, parent, b);
    attach(&mut doc, parent, c);

    doc.remove_child(parent, b).unwrap();

    // a and c are siblings now
    assert_eq!(doc.children(parent).unwrap(), vec![a, c]);
    assert_eq!(doc.try_next_sibling(a), Some(c));
    assert_eq!(doc.try_previous_sibling(c), Some(a));
}

#[test]
fn test_remove_child_last_of_three() {
    let mut doc = Document::new();
    let parent = alloc_element(&mut doc, "div");
    attach(&mut doc, NodeId::ROOT, parent);

    let a = alloc_element(&mut doc, "a");
    let b = alloc_element(&mut doc, "b");
    let c = alloc_element(&mut doc, "c");
    attach(&mut doc, parent, a);
    attach(&mut doc, parent, b);
    attach(&mut doc, parent, c);

    doc.remove_child(parent, c).unwrap();

    assert_eq!(doc.children(parent).unwrap(), vec![a, b]);
    assert_eq!(doc.try_next_sibling(b), None);
    assert_eq!(doc.try_last_child(parent), Some(b));
}

#[test]
fn test_remove_child_not_a_child_is_a_noop() {
    let mut doc = Document::new();
    let parent = alloc_element(&mut doc, "div");
    attach(&mut doc, NodeId::ROOT, parent);

    let loose = alloc_element(&mut doc, "p");
    doc.remove_child(parent, loose).unwrap();

    assert_eq!(doc.count_children(parent), 0);
    assert!(doc.contains(loose));
}

// ========== insert_before / insert_after ==========

#[test]
fn test_insert_before_first_child() {
    let mut doc = Document::new();
    let parent = alloc_element(&mut doc, "div");
    attach(&mut doc, NodeId::ROOT, parent);

    let existing = alloc_element(&mut doc, "b");
    attach(&mut doc, parent, existing);

    let new_child = alloc_element(&mut doc, "a");
    assert!(doc.insert_before(parent, new_child, existing).unwrap());

    // new_child should be first, existing second
    assert_eq!(doc.children(parent).unwrap(), vec![new_child, existing]);
    assert_eq!(doc.parent(new_child), Some(parent));
    assert_eq!(doc.try_next_sibling(new_child), Some(existing));
    assert_eq!(doc.try_previous_sibling(new_child), None);
    assert_eq!(doc.try_previous_sibling(existing), Some(new_child));
    assert_eq!(doc.try_first_child(parent), Some(new_child));
}

#[test]
fn test_insert_before_middle() {
    let mut doc = Document::new();
    let parent = alloc_element(&mut doc, "div");
    attach(&mut doc, NodeId::ROOT, parent);

    let a = alloc_element(&mut doc, "a");
    let c = alloc_element(&mut doc, "c");
    attach(&mut doc, parent, a);
    attach(&mut doc, parent, c);

    let b = alloc_element(&mut doc, "b");
    assert!(doc.insert_before(parent, b, c).unwrap());

    assert_eq!(doc.children(parent).unwrap(), vec![a, b, c]);
    assert_eq!(doc.try_next_sibling(a), Some(b));
    assert_eq!(doc.try_previous_sibling(b), Some(a));
    assert_eq!(doc.try_next_sibling(b), Some(c));
    assert_eq!(doc.try_previous_sibling(c), Some(b));
}

#[test]
fn test_insert_after_middle_and_tail() {
    let mut doc = Document::new();
    let parent = alloc_element(&mut doc, "div");
    attach(&mut doc, NodeId::ROOT, parent);

    let a = alloc_element(&mut doc, "a");
    let c = alloc_element(&mut doc, "c");
    attach(&mut doc, parent, a);
    attach(&mut doc, parent, c);

    let b = alloc_element(&mut doc, "b");
    assert!(doc.insert_after(parent, b, a).unwrap());
    assert_eq!(doc.children(parent).unwrap(), vec![a, b, c]);

    let d = alloc_element(&mut doc, "d");
    assert!(doc.insert_after(parent, d, c).unwrap());
    assert_eq!(doc.children(parent).unwrap(), vec![a, b, c, d]);
    assert_eq!(doc.try_last_child(parent), Some(d));
}

// ========== replace_child ==========

#[test]
fn test_replace_child_inherits_position() {
    let mut doc = Document::new();
    let parent = alloc_element(&mut doc, "div");
    attach(&mut doc, NodeId::ROOT, parent);

    let a = alloc_element(&mut doc, "a");
    let b = alloc_element(&mut doc, "b");
    let c = alloc_element(&mut doc, "c");
    attach(&mut doc, parent, a);
    attach(&mut doc, parent, b);
    attach(&mut doc, parent, c);

    let replacement = alloc_element(&mut doc, "em");
    doc.replace_child(parent, b, replacement).unwrap();

    assert_eq!(doc.children(parent).unwrap(), vec![a, replacement, c]);
    assert_eq!(doc.try_previous_sibling(replacement), Some(a));
    assert_eq!(doc.try_next_sibling(replacement), Some(c));

    // The old node is detached but alive
    assert!(doc.contains(b));
    assert_eq!(doc.parent(b), None);
    assert_eq!(doc.try_next_sibling(b), None);
}

#[test]
fn test_replace_child_requires_old_membership() {
    let mut doc = Document::new();
    let parent = alloc_element(&mut doc, "div");
    attach(&mut doc, NodeId::ROOT, parent);

    let stranger = alloc_element(&mut doc, "b");
    let replacement = alloc_element(&mut doc, "em");

    assert!(matches!(
        doc.replace_child(parent, stranger, replacement),
        Err(wombat_dom::DomError::ChildNotFound { .. })
    ));
}
