//! Rule application against a document tree.

use std::collections::HashSet;

use wombat_dom::{Document, NodeId};

use crate::rule::{MatchOperator, Rule, RuleGroup};

/// Runs one alternative's rules left to right below `start`.
///
/// Each ordinary rule replaces the candidate set with the matching nodes of
/// every current candidate's subtree, deduplicated in discovery order. A `>`
/// combinator narrows the following rule to direct children. The start node
/// itself is never a match.
pub(crate) fn seek(document: &Document, start: NodeId, group: &RuleGroup) -> Vec<NodeId> {
    if !group.rules.iter().any(|rule| !rule.alter_next) {
        return Vec::new();
    }
    let mut candidates = vec![start];
    let mut children_only = false;
    for rule in &group.rules {
        if rule.alter_next {
            children_only = true;
            continue;
        }
        let mut found = Vec::new();
        let mut seen = HashSet::new();
        for &candidate in &candidates {
            if children_only {
                for child in document.child_iter(candidate) {
                    if matches(document, child, rule) && seen.insert(child) {
                        found.push(child);
                    }
                }
            } else {
                for node in document.descendants(candidate) {
                    if matches(document, node, rule) && seen.insert(node) {
                        found.push(node);
                    }
                }
            }
        }
        candidates = found;
        children_only = false;
        if candidates.is_empty() {
            break;
        }
    }
    candidates
}

/// Tests one node against one rule.
fn matches(document: &Document, id: NodeId, rule: &Rule) -> bool {
    let Some(name) = document.tag_name(id) else {
        return false;
    };
    if !rule.tag.is_empty() && rule.tag != "*" && rule.tag != name {
        return false;
    }
    let keys = rule.key.as_list();
    if keys.is_empty() {
        return true;
    }
    let values = rule.value.as_list();
    keys.iter().enumerate().all(|(index, &key)| {
        let pattern = values.get(index).copied().unwrap_or("*");
        check_attribute(document, id, rule, key, pattern)
    })
}

/// Applies one attribute test. The placeholder pattern `*` asserts presence
/// only, and a negated rule asserts absence regardless of pattern.
fn check_attribute(
    document: &Document,
    id: NodeId,
    rule: &Rule,
    key: &str,
    pattern: &str,
) -> bool {
    if rule.negate_key {
        return !document.has_attribute(id, key);
    }
    if pattern == "*" {
        return document.has_attribute(id, key);
    }
    let Some(value) = document.attribute(id, key) else {
        return false;
    };
    compare(rule.operator, key, pattern, value)
}

/// Compares an attribute value against a pattern.
///
/// `class` equality is a word test per
/// [§ 6.6 Class selectors](https://www.w3.org/TR/selectors-4/#class-html):
/// every whitespace-separated name in the pattern must appear in the
/// attribute's word list, case-sensitively. All other comparisons are ASCII
/// case-insensitive on both sides.
fn compare(operator: MatchOperator, key: &str, pattern: &str, value: &str) -> bool {
    if operator == MatchOperator::Equal && key == "class" {
        return pattern
            .split_whitespace()
            .all(|name| value.split_whitespace().any(|word| word == name));
    }
    let value = value.to_ascii_lowercase();
    let pattern = pattern.to_ascii_lowercase();
    match operator {
        MatchOperator::Equal => value == pattern,
        MatchOperator::NotEqual => value != pattern,
        MatchOperator::StartsWith => value.starts_with(&pattern),
        MatchOperator::EndsWith => value.ends_with(&pattern),
        MatchOperator::Contains => value.contains(&pattern),
    }
}
