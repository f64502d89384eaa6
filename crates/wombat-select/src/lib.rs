//! CSS-dialect selector engine for Wombat document trees.
//!
//! Selectors follow a pragmatic subset of
//! [Selectors Level 4](https://www.w3.org/TR/selectors-4/): tag names, `#id`,
//! `.class` chains, `[key op value]` attribute tests with the operators `=`,
//! `!=`, `^=`, `$=` and `*=`, the child combinator `>`, descendant
//! combination by whitespace and alternatives separated by commas. The
//! dialect adds `[!key]` for attribute absence.
//!
//! Parsing never fails; matching walks the tree through read-only
//! [`Document`] accessors and returns node ids in discovery order.

mod parser;
mod rule;
mod seeker;

pub use rule::{MatchOperator, Rule, RuleGroup, RuleValues, SelectorSet};

use thiserror::Error;
use wombat_dom::{Document, NodeId};

/// A query that was expected to match at least one node matched none.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("selector '{selector}' matched nothing")]
pub struct EmptyResultError {
    /// The selector text as originally written.
    pub selector: String,
}

/// A parsed selector ready to run against any document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    raw: String,
    set: SelectorSet,
}

impl Selector {
    /// Parses a selector string. Parsing is total; malformed input yields a
    /// selector that matches fewer nodes rather than an error.
    #[must_use]
    pub fn parse(selector: &str) -> Self {
        Self {
            raw: selector.to_owned(),
            set: parser::parse(selector),
        }
    }

    /// Returns the selector text as originally written.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns the parsed alternatives.
    #[must_use]
    pub const fn set(&self) -> &SelectorSet {
        &self.set
    }

    /// Collects every match below `start`, walking the alternatives in
    /// source order. Matches are deduplicated within an alternative but not
    /// across alternatives.
    #[must_use]
    pub fn find(&self, document: &Document, start: NodeId) -> Vec<NodeId> {
        self.set
            .groups
            .iter()
            .flat_map(|group| seeker::seek(document, start, group))
            .collect()
    }

    /// Returns the `n`th match below `start`, counting from zero.
    #[must_use]
    pub fn find_nth(&self, document: &Document, start: NodeId, n: usize) -> Option<NodeId> {
        self.find(document, start).into_iter().nth(n)
    }

    /// Returns the first match below `start`.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyResultError`] when nothing matches.
    pub fn find_first(&self, document: &Document, start: NodeId) -> Result<NodeId, EmptyResultError> {
        self.find_nth(document, start, 0)
            .ok_or_else(|| EmptyResultError {
                selector: self.raw.clone(),
            })
    }
}

/// Parses and runs a selector in one step.
#[must_use]
pub fn select(document: &Document, start: NodeId, selector: &str) -> Vec<NodeId> {
    Selector::parse(selector).find(document, start)
}
