//! Cursor-based scanner over raw markup.
//!
//! [`Content`] wraps the immutable input buffer together with a single
//! cursor. Copy operations hand back owned spans and leave the cursor on the
//! first unconsumed character; the cursor only ever moves backward through
//! [`Content::rewind`]. Positions are byte offsets and every operation keeps
//! the cursor on a UTF-8 boundary.

use crate::error::LengthError;

/// Character classes the scanner stops at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// A blank: space, tab, carriage return or line feed.
    Blank,
    /// Ends a tag or attribute name: a blank, `=`, `/` or `>`.
    TagBound,
    /// Ends an unquoted attribute value: a blank or `>`.
    AttrBound,
    /// The `>` closing a tag.
    TagClose,
}

impl Boundary {
    /// Whether `c` belongs to this class.
    #[must_use]
    pub const fn contains(self, c: char) -> bool {
        match self {
            Self::Blank => matches!(c, ' ' | '\t' | '\r' | '\n'),
            Self::TagBound => matches!(c, ' ' | '\t' | '\r' | '\n' | '=' | '/' | '>'),
            Self::AttrBound => matches!(c, ' ' | '\t' | '\r' | '\n' | '>'),
            Self::TagClose => c == '>',
        }
    }
}

/// Scanning cursor over an immutable markup buffer.
#[derive(Debug, Clone)]
pub struct Content {
    buffer: String,
    position: usize,
}

impl Content {
    /// Wraps a markup buffer with the cursor at the start.
    #[must_use]
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            buffer: markup.into(),
            position: 0,
        }
    }

    /// The cursor's byte offset.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// The buffer length in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the cursor has consumed the whole buffer.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.buffer.len()
    }

    /// The character starting at the given byte offset, or at the cursor
    /// when `position` is `None`. Returns `None` at or past the end and on
    /// offsets that are not character boundaries.
    #[must_use]
    pub fn char_at(&self, position: Option<usize>) -> Option<char> {
        let position = position.unwrap_or(self.position);
        self.buffer
            .get(position..)
            .and_then(|rest| rest.chars().next())
    }

    /// Up to `count` characters ahead of the cursor, without moving it.
    #[must_use]
    pub fn read(&self, count: usize) -> String {
        self.rest().chars().take(count).collect()
    }

    /// Moves the cursor forward by `count` characters.
    ///
    /// # Errors
    ///
    /// Returns [`LengthError`] when fewer than `count` characters remain;
    /// the cursor does not move.
    pub fn advance(&mut self, count: usize) -> Result<(), LengthError> {
        match self.offset_of(count) {
            Some(offset) => {
                self.position += offset;
                Ok(())
            }
            None => Err(LengthError {
                position: self.position,
                requested: count,
                size: self.buffer.len(),
            }),
        }
    }

    /// Whether `count` characters remain ahead of the cursor.
    #[must_use]
    pub fn can_advance(&self, count: usize) -> bool {
        self.offset_of(count).is_some()
    }

    /// Moves the cursor back by up to `count` characters, stopping at the
    /// start of the buffer.
    pub fn rewind(&mut self, count: usize) {
        for _ in 0..count {
            match self.consumed().chars().next_back() {
                Some(c) => self.position -= c.len_utf8(),
                None => break,
            }
        }
    }

    /// Copies up to the next occurrence of `needle` and leaves the cursor on
    /// it. Without a match the remainder is returned and the cursor lands at
    /// the end; a cursor already on a match yields an empty string.
    pub fn copy_until(&mut self, needle: &str) -> String {
        let index = self.rest().find(needle);
        self.take_to(index)
    }

    /// Copies up to the first character of the `boundary` class, with the
    /// same cursor behavior as [`copy_until`](Self::copy_until).
    pub fn copy_until_any(&mut self, boundary: Boundary) -> String {
        let index = self.rest().find(|c| boundary.contains(c));
        self.take_to(index)
    }

    /// Like [`copy_until`](Self::copy_until), but a delimiter directly
    /// preceded by a `\` is skipped over; the backslash stays in the copied
    /// text.
    pub fn copy_until_escaped(&mut self, needle: &str) -> String {
        let mut from = 0;
        loop {
            let found = self
                .rest()
                .get(from..)
                .and_then(|tail| tail.find(needle))
                .map(|index| from + index);
            match found {
                Some(index) if is_escaped(self.rest(), index) => {
                    from = index + needle.len();
                }
                index => return self.take_to(index),
            }
        }
    }

    /// Speculatively consumes one character, then scans for `needle` with
    /// escape handling. Commits only when the span before the delimiter is
    /// free of `forbidden` characters, returning the needle followed by the
    /// span; otherwise the cursor returns to where it started and the result
    /// is empty.
    ///
    /// # Errors
    ///
    /// Returns [`LengthError`] when the cursor is already at the end; the
    /// initial one-character step is the only move that can fail.
    pub fn copy_until_guarded(
        &mut self,
        needle: &str,
        forbidden: Boundary,
    ) -> Result<String, LengthError> {
        let saved = self.position;
        self.advance(1)?;
        let span = self.copy_until_escaped(needle);
        if span.chars().any(|c| forbidden.contains(c)) {
            self.position = saved;
            return Ok(String::new());
        }
        Ok(format!("{needle}{span}"))
    }

    /// Advances over a maximal run of `boundary` characters.
    pub fn skip(&mut self, boundary: Boundary) {
        let rest = self.rest();
        let end = rest
            .find(|c| !boundary.contains(c))
            .unwrap_or(rest.len());
        self.position += end;
    }

    /// Advances over a maximal run of `boundary` characters and returns it.
    pub fn skip_and_copy(&mut self, boundary: Boundary) -> String {
        let rest = self.rest();
        let end = rest
            .find(|c| !boundary.contains(c))
            .unwrap_or(rest.len());
        self.take_to(Some(end))
    }

    /// Restores a cursor position previously observed through
    /// [`position`](Self::position).
    pub(crate) const fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    /// The unconsumed tail of the buffer.
    fn rest(&self) -> &str {
        self.buffer.get(self.position..).unwrap_or("")
    }

    /// The consumed head of the buffer.
    fn consumed(&self) -> &str {
        self.buffer.get(..self.position).unwrap_or("")
    }

    /// Copies the first `index` bytes of the tail (the whole tail on `None`)
    /// and moves the cursor past them.
    fn take_to(&mut self, index: Option<usize>) -> String {
        let rest = self.rest();
        let end = index.unwrap_or(rest.len());
        let copied = rest.get(..end).map_or_else(String::new, str::to_owned);
        self.position += copied.len();
        copied
    }

    /// Byte offset of the character `count` steps ahead, or `None` when the
    /// buffer is too short.
    fn offset_of(&self, count: usize) -> Option<usize> {
        let mut chars = self.rest().chars();
        let mut offset = 0;
        for _ in 0..count {
            offset += chars.next()?.len_utf8();
        }
        Some(offset)
    }
}

/// A delimiter match does not count when the byte before it is a `\`.
fn is_escaped(text: &str, index: usize) -> bool {
    index > 0 && text.as_bytes()[index - 1] == b'\\'
}
