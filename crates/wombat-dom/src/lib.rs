//! Document tree for the Wombat HTML engine.
//!
//! This crate provides an arena-based tree following the shape of the
//! [DOM Living Standard](https://dom.spec.whatwg.org/) tree concepts, with
//! the mutation surface of a forgiving HTML library: insertion that refuses
//! cycles, no-op removal, position-inheriting replacement, and paired
//! fail-fast / probing navigation.
//!
//! # Design
//!
//! Nodes live in a [`Document`] arena addressed by [`NodeId`] indices.
//! Sibling order is carried by per-node `prev`/`next` links rather than by
//! child vectors, so splicing anywhere in a child list is O(1). Deleting a
//! subtree tombstones its slots; ids are never reused.

mod document;
mod encoding;
mod entities;
mod error;
mod node;
mod tag;

pub use document::{AncestorIterator, ChildIterator, DescendantIterator, Document, Node, NodeId};
pub use encoding::Encoding;
pub use entities::decode_special_chars;
pub use error::DomError;
pub use node::{NodeData, TextData};
pub use tag::{Attribute, Tag};
