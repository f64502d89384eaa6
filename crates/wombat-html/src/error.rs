//! Parser error types.

use thiserror::Error;

use wombat_dom::DomError;

/// The scanner was asked to move forward past the end of its buffer.
///
/// Forward motion past the end is never clamped; the caller decides whether
/// to recover (the forgiving parser rewinds and re-reads the span as text)
/// or to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot advance {requested} character(s) at byte {position} of {size}")]
pub struct LengthError {
    /// Cursor position when the move was attempted.
    pub position: usize,
    /// Characters the caller asked to move over.
    pub requested: usize,
    /// Total buffer length in bytes.
    pub size: usize,
}

/// A parse run failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The scanner ran past the end of the input.
    #[error(transparent)]
    Length(#[from] LengthError),
    /// The document tree rejected a node insertion.
    #[error(transparent)]
    Tree(#[from] DomError),
    /// Strict mode refused to repair malformed markup.
    #[error("strict parse failed at byte {position}: {reason}")]
    Strict {
        /// What the parser found.
        reason: String,
        /// Byte position in the source markup.
        position: usize,
    },
}
