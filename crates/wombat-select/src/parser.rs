//! Selector string parsing.
//!
//! The grammar is a small CSS dialect: comma-separated alternatives, each a
//! whitespace-separated sequence of compound tokens per
//! [§ 4.1 Structure of a Selector](https://www.w3.org/TR/selectors-4/#structure).
//! A compound token is an optional tag name (`*` matches anything) followed
//! by any mix of `#id`, `.class` chains and `[key op value]` attribute tests.
//! Parsing is total: unrecognized characters are skipped, unterminated
//! brackets are closed at end of input, and an empty result simply matches
//! nothing.

use std::iter::Peekable;
use std::str::Chars;

use crate::rule::{MatchOperator, Rule, RuleGroup, RuleValues, SelectorSet};

/// Characters allowed in a tag name token. `*` is the universal selector.
const fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ':' | '*')
}

/// Characters allowed in an attribute key.
const fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ':')
}

/// Characters allowed in an id or class name.
const fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-')
}

/// Parses a selector string into its alternatives. Never fails.
pub(crate) fn parse(selector: &str) -> SelectorSet {
    let mut groups = Vec::new();
    let mut rules: Vec<Rule> = Vec::new();
    let mut chars = selector.chars().peekable();
    while let Some(&ch) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                let _ = chars.next();
            }
            ',' => {
                let _ = chars.next();
                flush_group(&mut groups, &mut rules);
            }
            '>' => {
                let _ = chars.next();
                rules.push(Rule::child_combinator());
            }
            _ => {
                if let Some(rule) = parse_compound(&mut chars) {
                    rules.push(rule);
                }
            }
        }
    }
    flush_group(&mut groups, &mut rules);
    SelectorSet { groups }
}

/// Closes the current alternative. Alternatives holding nothing but `>`
/// combinators can never match and are dropped.
fn flush_group(groups: &mut Vec<RuleGroup>, rules: &mut Vec<Rule>) {
    if rules.iter().any(|rule| !rule.alter_next) {
        groups.push(RuleGroup {
            rules: std::mem::take(rules),
        });
    } else {
        rules.clear();
    }
}

/// Parses one compound token. Returns `None` for stray characters, consuming
/// at least one character either way.
fn parse_compound(chars: &mut Peekable<Chars<'_>>) -> Option<Rule> {
    let mut tag = String::new();
    while let Some(&c) = chars.peek() {
        if !is_tag_char(c) {
            break;
        }
        tag.push(c);
        let _ = chars.next();
    }

    let mut keys = Vec::new();
    let mut values = Vec::new();
    let mut operator = MatchOperator::Equal;
    let mut negate_key = false;
    let mut consumed = !tag.is_empty();
    while let Some(&c) = chars.peek() {
        match c {
            '#' => {
                let _ = chars.next();
                consumed = true;
                let id = read_name(chars);
                if !id.is_empty() {
                    keys.push("id".to_owned());
                    values.push(id);
                }
            }
            '.' => {
                let _ = chars.next();
                consumed = true;
                // A dot chain like `.a.b` is one test requiring every
                // listed class, so the names collapse into one pattern.
                let mut classes = Vec::new();
                loop {
                    let name = read_name(chars);
                    if !name.is_empty() {
                        classes.push(name);
                    }
                    if chars.peek() == Some(&'.') {
                        let _ = chars.next();
                    } else {
                        break;
                    }
                }
                if !classes.is_empty() {
                    keys.push("class".to_owned());
                    values.push(classes.join(" "));
                }
            }
            '[' => {
                consumed = true;
                parse_attribute(chars, &mut keys, &mut values, &mut operator, &mut negate_key);
            }
            _ => break,
        }
    }

    if !consumed {
        // Stray character such as a lone `)`; skip it and move on.
        let _ = chars.next();
        return None;
    }
    if tag.is_empty() && keys.is_empty() {
        return None;
    }
    Some(Rule {
        tag: tag.to_ascii_lowercase(),
        operator,
        key: RuleValues::from_list(keys),
        value: RuleValues::from_list(values),
        negate_key,
        alter_next: false,
    })
}

/// Parses one `[...]` attribute test and appends its key and pattern.
///
/// Presence-only tests record the placeholder pattern `*`. An `@` before the
/// key is accepted and ignored, a `!` before the key flips the rule to
/// require absence, and anything between the pattern and `]` is discarded.
fn parse_attribute(
    chars: &mut Peekable<Chars<'_>>,
    keys: &mut Vec<String>,
    values: &mut Vec<String>,
    operator: &mut MatchOperator,
    negate_key: &mut bool,
) {
    let _ = chars.next();
    if chars.peek() == Some(&'@') {
        let _ = chars.next();
    }
    if chars.peek() == Some(&'!') {
        let _ = chars.next();
        *negate_key = true;
    }
    let mut key = String::new();
    while let Some(&c) = chars.peek() {
        if !is_key_char(c) {
            break;
        }
        key.push(c);
        let _ = chars.next();
    }
    skip_blank(chars);

    let mut value = "*".to_owned();
    match chars.peek() {
        Some(&'=') => {
            let _ = chars.next();
            *operator = MatchOperator::Equal;
            value = read_pattern(chars);
        }
        Some(&c @ ('!' | '^' | '$' | '*')) => {
            let _ = chars.next();
            if chars.peek() == Some(&'=') {
                let _ = chars.next();
                *operator = match c {
                    '!' => MatchOperator::NotEqual,
                    '^' => MatchOperator::StartsWith,
                    '$' => MatchOperator::EndsWith,
                    _ => MatchOperator::Contains,
                };
                value = read_pattern(chars);
            }
        }
        _ => {}
    }
    while let Some(&c) = chars.peek() {
        let _ = chars.next();
        if c == ']' {
            break;
        }
    }
    if !key.is_empty() {
        keys.push(key.to_ascii_lowercase());
        values.push(value);
    }
}

/// Reads an attribute pattern, stripping one level of matching quotes.
fn read_pattern(chars: &mut Peekable<Chars<'_>>) -> String {
    skip_blank(chars);
    let mut pattern = String::new();
    match chars.peek() {
        Some(&quote @ ('"' | '\'')) => {
            let _ = chars.next();
            while let Some(&c) = chars.peek() {
                let _ = chars.next();
                if c == quote {
                    break;
                }
                pattern.push(c);
            }
        }
        _ => {
            while let Some(&c) = chars.peek() {
                if c == ']' {
                    break;
                }
                pattern.push(c);
                let _ = chars.next();
            }
            pattern.truncate(pattern.trim_end().len());
        }
    }
    pattern
}

/// Reads an id or class name.
fn read_name(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut name = String::new();
    while let Some(&c) = chars.peek() {
        if !is_name_char(c) {
            break;
        }
        name.push(c);
        let _ = chars.next();
    }
    name
}

/// Skips ASCII whitespace inside a bracket test.
fn skip_blank(chars: &mut Peekable<Chars<'_>>) {
    while let Some(&c) = chars.peek() {
        if !c.is_whitespace() {
            break;
        }
        let _ = chars.next();
    }
}
