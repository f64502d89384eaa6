//! Node payloads: element tags and text runs.

use std::cell::OnceCell;

use crate::encoding::Encoding;
use crate::entities::decode_special_chars;
use crate::tag::Tag;

/// What a tree node holds: an element (container) or a text run (leaf).
#[derive(Debug, Clone)]
pub enum NodeData {
    /// A container element described by its [`Tag`].
    Element(Tag),
    /// A leaf text run.
    Text(TextData),
}

impl NodeData {
    /// The tag name used for selector matching: the element's name, or
    /// `"text"` for text runs.
    #[must_use]
    pub fn tag_name(&self) -> &str {
        match self {
            Self::Element(tag) => tag.name(),
            Self::Text(_) => "text",
        }
    }
}

/// The payload of a text node.
///
/// Holds the stored text plus a cache of the converted form (charset
/// conversion and optional character-reference decoding applied). The cache
/// fills on first read and is dropped whenever the payload or the document
/// encoding changes.
#[derive(Debug, Clone)]
pub struct TextData {
    text: String,
    decode_special: bool,
    converted: OnceCell<String>,
}

impl TextData {
    /// Wrap a string exactly as given.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            decode_special: false,
            converted: OnceCell::new(),
        }
    }

    /// Build the payload for a text run lifted out of markup:
    /// optionally collapse every whitespace run to a single space, then
    /// restore `&#10;` sequences to real newlines.
    #[must_use]
    pub fn from_markup(raw: &str, remove_double_space: bool, decode_special: bool) -> Self {
        let text = if remove_double_space {
            collapse_whitespace(raw)
        } else {
            raw.to_owned()
        };
        Self {
            text: text.replace("&#10;", "\n"),
            decode_special,
            converted: OnceCell::new(),
        }
    }

    /// The stored text, before conversion.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.text
    }

    /// Replace the stored text and drop the conversion cache.
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        let _ = self.converted.take();
    }

    /// Whether reads decode the basic character references.
    #[must_use]
    pub const fn decodes_special_chars(&self) -> bool {
        self.decode_special
    }

    /// The text as read through the document: charset conversion first,
    /// then character-reference decoding if enabled. Cached until the
    /// payload or encoding changes.
    #[must_use]
    pub fn rendered(&self, encoding: Option<&Encoding>) -> String {
        self.converted
            .get_or_init(|| {
                let mut text = match encoding {
                    Some(encoding) => encoding.convert(&self.text),
                    None => self.text.clone(),
                };
                if self.decode_special {
                    text = decode_special_chars(&text);
                }
                text
            })
            .clone()
    }

    /// Drop the conversion cache (called when the document encoding changes).
    pub fn invalidate(&mut self) {
        let _ = self.converted.take();
    }
}

/// Collapse every run of whitespace to a single space character.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}
