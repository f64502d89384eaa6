//! Parsed representation of a selector expression.
//!
//! A selector string such as `div.item > a[href], p.note` parses into a
//! [`SelectorSet`]: one [`RuleGroup`] per comma-separated alternative, each
//! holding the [`Rule`]s that are applied left to right against the tree.

use std::fmt;

use strum_macros::Display;

/// Comparison operator of an attribute test.
///
/// The quoted forms follow
/// [§ 6.3 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
/// where the standard defines them (`=`, `^=`, `$=`, `*=`); `!=` is a
/// dialect extension meaning "attribute present with a different value".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MatchOperator {
    /// `[key=value]`: the attribute value equals the pattern.
    #[strum(serialize = "=")]
    Equal,
    /// `[key!=value]`: the attribute value differs from the pattern.
    #[strum(serialize = "!=")]
    NotEqual,
    /// `[key^=value]`: the attribute value starts with the pattern.
    #[strum(serialize = "^=")]
    StartsWith,
    /// `[key$=value]`: the attribute value ends with the pattern.
    #[strum(serialize = "$=")]
    EndsWith,
    /// `[key*=value]`: the attribute value contains the pattern.
    #[strum(serialize = "*=")]
    Contains,
}

/// Attribute keys or patterns attached to a single [`Rule`].
///
/// A compound token may test several attributes at once
/// (`input[type=radio][checked]`), so both the key side and the value side
/// can carry more than one entry. Keys and values pair up by position; a
/// value of `*` is a placeholder that only asserts presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleValues {
    /// No attribute test on this side.
    None,
    /// A single entry.
    Single(String),
    /// One entry per attribute test, in source order.
    Multiple(Vec<String>),
}

impl RuleValues {
    /// Returns the entries as a flat list; [`RuleValues::None`] yields an
    /// empty list.
    #[must_use]
    pub fn as_list(&self) -> Vec<&str> {
        match self {
            Self::None => Vec::new(),
            Self::Single(value) => vec![value.as_str()],
            Self::Multiple(values) => values.iter().map(String::as_str).collect(),
        }
    }

    /// Returns `true` when no entry is present.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Wraps a list of entries in the smallest fitting variant.
    #[must_use]
    pub fn from_list(mut values: Vec<String>) -> Self {
        match values.len() {
            0 => Self::None,
            1 => match values.pop() {
                Some(value) => Self::Single(value),
                None => Self::None,
            },
            _ => Self::Multiple(values),
        }
    }
}

/// One step of a selector alternative.
///
/// Ordinary rules describe a node test: an optional tag name plus any number
/// of attribute tests. The child combinator `>` is carried as its own rule
/// with [`alter_next`](Self::alter_next) set; it matches no node itself and
/// instead restricts the following rule to direct children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Lowercased tag name; empty or `*` matches any node.
    pub tag: String,
    /// Operator applied to the attribute tests of this rule.
    pub operator: MatchOperator,
    /// Attribute names to test, lowercased.
    pub key: RuleValues,
    /// Patterns paired with [`key`](Self::key) by position.
    pub value: RuleValues,
    /// `[!key]`: require the attribute to be absent.
    pub negate_key: bool,
    /// This rule is the `>` combinator token.
    pub alter_next: bool,
}

impl Rule {
    /// Creates a tag-only rule with no attribute tests.
    #[must_use]
    pub fn for_tag(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            operator: MatchOperator::Equal,
            key: RuleValues::None,
            value: RuleValues::None,
            negate_key: false,
            alter_next: false,
        }
    }

    /// Creates the child combinator rule produced by a `>` token.
    #[must_use]
    pub fn child_combinator() -> Self {
        Self {
            tag: ">".to_owned(),
            operator: MatchOperator::Equal,
            key: RuleValues::None,
            value: RuleValues::None,
            negate_key: false,
            alter_next: true,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alter_next {
            return write!(f, ">");
        }
        write!(f, "{}", self.tag)?;
        let keys = self.key.as_list();
        let values = self.value.as_list();
        for (index, key) in keys.iter().enumerate() {
            let negate = if self.negate_key { "!" } else { "" };
            match values.get(index) {
                Some(&"*") | None => write!(f, "[{negate}{key}]")?,
                Some(value) => write!(f, "[{negate}{key}{}{value}]", self.operator)?,
            }
        }
        Ok(())
    }
}

/// The rules of one comma-separated selector alternative, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleGroup {
    /// Rules applied left to right; empty groups are never stored.
    pub rules: Vec<Rule>,
}

/// Every alternative of a parsed selector string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectorSet {
    /// One group per comma-separated alternative, in source order.
    pub groups: Vec<RuleGroup>,
}

impl SelectorSet {
    /// Returns `true` when the selector had no usable alternative.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
