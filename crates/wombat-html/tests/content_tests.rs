//! Integration tests for the markup scanner.

use wombat_html::{Boundary, Content};

// ========== Cursor motion ==========

#[test]
fn test_advance_and_read() {
    let mut content = Content::new("abcdef");
    assert_eq!(content.position(), 0);
    assert_eq!(content.read(3), "abc");
    content.advance(2).unwrap();
    assert_eq!(content.position(), 2);
    assert_eq!(content.read(3), "cde");
    // An out-of-range read yields what remains.
    assert_eq!(content.read(99), "cdef");
}

#[test]
fn test_advance_past_end_fails_without_moving() {
    let mut content = Content::new("ab");
    let err = content.advance(3).unwrap_err();
    assert_eq!(err.position, 0);
    assert_eq!(err.requested, 3);
    assert_eq!(err.size, 2);
    assert_eq!(content.position(), 0);
    assert!(content.can_advance(2));
    assert!(!content.can_advance(3));
}

#[test]
fn test_rewind_clamps_at_the_start() {
    let mut content = Content::new("abcdef");
    content.advance(4).unwrap();
    content.rewind(2);
    assert_eq!(content.position(), 2);
    content.rewind(10);
    assert_eq!(content.position(), 0);
}

#[test]
fn test_char_at_defaults_to_the_cursor() {
    let mut content = Content::new("xyz");
    assert_eq!(content.char_at(None), Some('x'));
    content.advance(1).unwrap();
    assert_eq!(content.char_at(None), Some('y'));
    assert_eq!(content.char_at(Some(2)), Some('z'));
    assert_eq!(content.char_at(Some(3)), None);
}

#[test]
fn test_multibyte_positions_stay_on_boundaries() {
    let mut content = Content::new("aß☃b");
    content.advance(2).unwrap();
    assert_eq!(content.position(), 3);
    assert_eq!(content.char_at(None), Some('☃'));
    // Byte 2 is the middle of ß, not a character boundary.
    assert_eq!(content.char_at(Some(2)), None);
    content.rewind(1);
    assert_eq!(content.char_at(None), Some('ß'));
}

// ========== Copy operations ==========

#[test]
fn test_copy_until_stops_on_the_needle() {
    let mut content = Content::new("hello<world>");
    assert_eq!(content.copy_until("<"), "hello");
    assert_eq!(content.char_at(None), Some('<'));
    // Already on a match: no motion, empty copy.
    assert_eq!(content.copy_until("<"), "");
    assert_eq!(content.position(), 5);
}

#[test]
fn test_copy_until_without_match_takes_the_remainder() {
    let mut content = Content::new("no angle bracket");
    assert_eq!(content.copy_until("<"), "no angle bracket");
    assert!(content.is_at_end());
    assert_eq!(content.copy_until("<"), "");
}

#[test]
fn test_copy_until_any_stops_on_the_class() {
    let mut content = Content::new("name=value>");
    assert_eq!(content.copy_until_any(Boundary::TagBound), "name");
    assert_eq!(content.char_at(None), Some('='));
    content.advance(1).unwrap();
    assert_eq!(content.copy_until_any(Boundary::AttrBound), "value");
    assert_eq!(content.char_at(None), Some('>'));
}

#[test]
fn test_copy_until_escaped_skips_escaped_delimiters() {
    let mut content = Content::new("a\\\"b\"c");
    assert_eq!(content.copy_until_escaped("\""), "a\\\"b");
    // The cursor lands on the unescaped quote.
    assert_eq!(content.position(), 4);
    assert_eq!(content.char_at(None), Some('"'));
}

#[test]
fn test_copy_until_guarded_commits_without_forbidden_chars() {
    let mut content = Content::new("\"quoted\" rest");
    let copied = content.copy_until_guarded("\"", Boundary::Blank).unwrap();
    assert_eq!(copied, "\"quoted");
    assert_eq!(content.char_at(None), Some('"'));
}

#[test]
fn test_copy_until_guarded_rejects_and_rewinds() {
    let mut content = Content::new("\"has blank\" rest");
    let copied = content.copy_until_guarded("\"", Boundary::Blank).unwrap();
    assert_eq!(copied, "");
    assert_eq!(content.position(), 0);
}

#[test]
fn test_copy_until_guarded_fails_only_at_the_end() {
    let mut content = Content::new("");
    assert!(content.copy_until_guarded("\"", Boundary::Blank).is_err());
}

// ========== Skipping ==========

#[test]
fn test_skip_consumes_a_maximal_run() {
    let mut content = Content::new("  \t\r\nword");
    content.skip(Boundary::Blank);
    assert_eq!(content.char_at(None), Some('w'));
    // Skipping with no run present is a no-op.
    content.skip(Boundary::Blank);
    assert_eq!(content.char_at(None), Some('w'));
}

#[test]
fn test_skip_and_copy_returns_the_run() {
    let mut content = Content::new("   x");
    assert_eq!(content.skip_and_copy(Boundary::Blank), "   ");
    assert_eq!(content.position(), 3);
}

// ========== Whole-buffer properties ==========

#[test]
fn test_copies_reconstruct_the_input() {
    let source = "<a href=\"x\">text</a> tail";
    let mut content = Content::new(source);
    let mut pieces = String::new();
    while !content.is_at_end() {
        let copied = content.copy_until_any(Boundary::TagBound);
        if copied.is_empty() {
            pieces.push_str(&content.read(1));
            content.advance(1).unwrap();
        } else {
            pieces.push_str(&copied);
        }
    }
    assert_eq!(pieces, source);
}

#[test]
fn test_cursor_never_moves_backward_while_scanning() {
    let mut content = Content::new("alpha beta gamma");
    let mut last = content.position();
    while !content.is_at_end() {
        let _ = content.copy_until_any(Boundary::Blank);
        content.skip(Boundary::Blank);
        let now = content.position();
        assert!(now > last);
        last = now;
    }
}
