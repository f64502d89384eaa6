//! Forgiving HTML parsing for Wombat document trees.
//!
//! The parser is a single-pass tag-soup builder rather than the full
//! [§ 13.2 Parsing HTML documents](https://html.spec.whatwg.org/multipage/parsing.html)
//! state machine: malformed markup is repaired in place (stray `<` becomes
//! text, orphan closers are dropped, open elements close at end of input)
//! and the result is always a tree. Strict mode turns each repair into a
//! [`ParseError`] instead.
//!
//! [`Dom::load_str`] is the usual entry point; [`Content`], [`DomParser`]
//! and [`Options`] are exposed for callers that drive a parse themselves.

mod content;
mod dom;
mod error;
mod options;
mod parser;

pub use content::{Boundary, Content};
pub use dom::Dom;
pub use error::{LengthError, ParseError};
pub use options::Options;
pub use parser::{DomParser, print_tree};
