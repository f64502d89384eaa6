//! The tag-soup parser: markup in, document tree out.
//!
//! The builder walks the buffer once with the [`Content`] cursor. Text runs
//! up to the next `<` become text nodes; at a `<` the parser consumes a
//! comment, a markup declaration, a closing tag or an opening tag. Anything
//! that turns out not to be a tag is re-read as text, so every byte of input
//! lands in the tree or is deliberately discarded (comments, declarations,
//! stray closers). Strict mode turns the repairs into errors instead.

use wombat_common::warning::warn_once;
use wombat_dom::{Attribute, Document, Encoding, NodeData, NodeId, Tag, TextData};
use wombat_select::select;

use crate::content::{Boundary, Content};
use crate::error::{LengthError, ParseError};
use crate::options::Options;

/// Rough markup bytes per tree node, used to pre-size the arena.
const BYTES_PER_NODE: usize = 16;

/// What became of the construct starting at a `<`.
enum Step {
    /// A tag, comment or declaration was consumed.
    Consumed,
    /// Not markup after all; the cursor is back on the `<`.
    Text,
}

/// Builds a [`Document`] from markup, repairing tag soup as it goes.
pub struct DomParser {
    options: Options,
}

impl DomParser {
    /// Creates a parser with the given configuration.
    #[must_use]
    pub const fn new(options: Options) -> Self {
        Self { options }
    }

    /// The active configuration.
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// Parses the whole buffer into a fresh document.
    ///
    /// `size_hint` is the byte length of the original input; it pre-sizes
    /// the node arena.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Strict`] in strict mode on malformed or
    /// unclosed markup, and [`ParseError::Length`] if a scan overruns the
    /// buffer.
    pub fn parse(&self, content: &mut Content, size_hint: usize) -> Result<Document, ParseError> {
        let mut document = Document::with_capacity(size_hint / BYTES_PER_NODE);
        let mut open = vec![document.root()];
        while !content.is_at_end() {
            let text = content.copy_until("<");
            if text.is_empty() {
                if content.is_at_end() {
                    break;
                }
                match self.consume_markup(content, &mut document, &mut open)? {
                    Step::Consumed => {}
                    Step::Text => {
                        content.advance(1)?;
                        let run = format!("<{}", content.copy_until("<"));
                        self.attach_text(&mut document, &open, &run)?;
                    }
                }
            } else {
                self.attach_text(&mut document, &open, &text)?;
            }
        }
        if open.len() > 1 && self.options.is_strict() {
            let name = open
                .get(1)
                .and_then(|&id| document.tag_name(id))
                .unwrap_or("?")
                .to_owned();
            return Err(ParseError::Strict {
                reason: format!("'<{name}>' was never closed"),
                position: content.position(),
            });
        }
        Ok(document)
    }

    /// Installs the document's text encoding.
    ///
    /// With `enforce_encoding` configured the declared charset is ignored
    /// and the enforced one pinned. Otherwise the first `meta[charset]`
    /// wins; its label may be bare (`utf-8`) or buried in a content blob
    /// (`text/html; charset=utf-8`). Returns whether a declaration was
    /// found and installed.
    pub fn detect_charset(&self, default_charset: &str, document: &mut Document) -> bool {
        if let Some(enforced) = self.options.enforce_encoding() {
            document.install_encoding(Encoding::new(enforced));
            return false;
        }
        let label = select(document, document.root(), "meta[charset]")
            .first()
            .and_then(|&meta| document.attribute(meta, "charset"))
            .map(|value| charset_label(value).to_owned());
        match label {
            Some(label) => {
                let mut encoding = Encoding::new(default_charset);
                encoding.set_from(&label);
                document.install_encoding(encoding);
                true
            }
            None => {
                document.install_encoding(Encoding::new(default_charset));
                false
            }
        }
    }

    /// Consumes the construct starting at the `<` under the cursor.
    fn consume_markup(
        &self,
        content: &mut Content,
        document: &mut Document,
        open: &mut Vec<NodeId>,
    ) -> Result<Step, ParseError> {
        let start = content.position();
        content.advance(1)?;
        match content.char_at(None) {
            Some('!') => {
                consume_declaration(content)?;
                Ok(Step::Consumed)
            }
            Some('/') => {
                consume_closer(content, document, open)?;
                Ok(Step::Consumed)
            }
            Some(_) => self.consume_opener(start, content, document, open),
            None => {
                content.set_position(start);
                Ok(Step::Text)
            }
        }
    }

    /// Parses an opening tag, attaches the element and adjusts the open
    /// stack. On malformed markup the forgiving mode rewinds to the `<` and
    /// reports it as text; strict mode fails.
    fn consume_opener(
        &self,
        start: usize,
        content: &mut Content,
        document: &mut Document,
        open: &mut Vec<NodeId>,
    ) -> Result<Step, ParseError> {
        let name = content.copy_until_any(Boundary::TagBound);
        if name.is_empty() || !is_tag_name(&name) {
            content.set_position(start);
            return Ok(Step::Text);
        }
        let mut tag =
            Tag::new(&name).with_special_chars_decode(self.options.decodes_special_chars());
        loop {
            content.skip(Boundary::Blank);
            match content.char_at(None) {
                None => {
                    if self.options.is_strict() {
                        return Err(ParseError::Strict {
                            reason: format!("'<{name}>' was never finished"),
                            position: content.position(),
                        });
                    }
                    warn_once(
                        "HTML Parser",
                        &format!("malformed tag at byte {start} consumed as text"),
                    );
                    content.set_position(start);
                    return Ok(Step::Text);
                }
                Some('>') => {
                    content.advance(1)?;
                    break;
                }
                Some('/') => {
                    content.advance(1)?;
                    content.skip(Boundary::Blank);
                    if content.char_at(None) == Some('>') {
                        content.advance(1)?;
                        tag.set_self_closing(true);
                        tag.set_trailing_slash(true);
                        break;
                    }
                    // A slash that closes nothing; drop it and carry on.
                }
                Some(_) => {
                    if !self.consume_attribute(content, &mut tag)? {
                        warn_once(
                            "HTML Parser",
                            &format!("malformed tag at byte {start} consumed as text"),
                        );
                        content.set_position(start);
                        return Ok(Step::Text);
                    }
                }
            }
        }

        let lowered = tag.name().to_owned();
        if self.options.is_self_closing(&lowered) {
            tag.set_self_closing(true);
        }
        let self_closing = tag.is_self_closing();
        let raw_text = self.options.is_raw_text(&lowered);
        let id = document.alloc(NodeData::Element(tag));
        let parent = open.last().copied().unwrap_or(NodeId::ROOT);
        let _ = document.add_child(parent, id)?;
        if self_closing {
            return Ok(Step::Consumed);
        }
        if raw_text {
            let raw = capture_raw_text(content, &lowered)?;
            if !raw.is_empty() {
                let data = TextData::from_markup(
                    &raw,
                    self.options.removes_double_space(),
                    self.options.decodes_special_chars(),
                );
                let child = document.alloc(NodeData::Text(data));
                let _ = document.add_child(id, child)?;
            }
            return Ok(Step::Consumed);
        }
        open.push(id);
        Ok(Step::Consumed)
    }

    /// Parses one attribute onto `tag`. Returns `false` when a quoted value
    /// never closes, which aborts the whole tag in the forgiving mode.
    fn consume_attribute(&self, content: &mut Content, tag: &mut Tag) -> Result<bool, ParseError> {
        let name = content.copy_until_any(Boundary::TagBound);
        if name.is_empty() {
            // A stray `=` with no name before it; drop the character.
            content.advance(1)?;
            return Ok(true);
        }
        content.skip(Boundary::Blank);
        if content.char_at(None) != Some('=') {
            tag.set_attribute(&name, Attribute::valueless());
            return Ok(true);
        }
        content.advance(1)?;
        content.skip(Boundary::Blank);
        match content.char_at(None) {
            Some(quote @ ('"' | '\'')) => {
                content.advance(1)?;
                let delimiter = if quote == '"' { "\"" } else { "'" };
                let value = content.copy_until_escaped(delimiter);
                if content.is_at_end() {
                    if self.options.is_strict() {
                        return Err(ParseError::Strict {
                            reason: format!("attribute '{name}' has an unterminated value"),
                            position: content.position(),
                        });
                    }
                    return Ok(false);
                }
                content.advance(1)?;
                let attribute = if quote == '"' {
                    Attribute::new(value)
                } else {
                    Attribute::single_quoted(value)
                };
                tag.set_attribute(&name, attribute);
            }
            _ => {
                let value = content.copy_until_any(Boundary::AttrBound);
                tag.set_attribute(&name, Attribute::new(value));
            }
        }
        Ok(true)
    }

    /// Attaches a text run to the innermost open container, subject to the
    /// whitespace filter.
    fn attach_text(
        &self,
        document: &mut Document,
        open: &[NodeId],
        text: &str,
    ) -> Result<(), ParseError> {
        if !self.options.keeps_whitespace_text_nodes() && text.trim().is_empty() {
            return Ok(());
        }
        let data = TextData::from_markup(
            text,
            self.options.removes_double_space(),
            self.options.decodes_special_chars(),
        );
        let id = document.alloc(NodeData::Text(data));
        let parent = open.last().copied().unwrap_or(NodeId::ROOT);
        let _ = document.add_child(parent, id)?;
        Ok(())
    }
}

/// Skips a comment (`<!--` to `-->`) or a markup declaration (`<!` to `>`).
/// Both are discarded; the tree keeps only elements and text.
fn consume_declaration(content: &mut Content) -> Result<(), LengthError> {
    if content.read(3) == "!--" {
        content.advance(3)?;
        let _ = content.copy_until("-->");
        if content.can_advance(3) {
            content.advance(3)?;
        }
    } else {
        let _ = content.copy_until(">");
        if !content.is_at_end() {
            content.advance(1)?;
        }
    }
    Ok(())
}

/// Consumes `</name ...>`. The open stack pops up to and including the
/// innermost element with that name, implicitly closing everything above
/// it; without a match the closer is discarded as noise.
fn consume_closer(
    content: &mut Content,
    document: &Document,
    open: &mut Vec<NodeId>,
) -> Result<(), LengthError> {
    content.advance(1)?;
    let name = content
        .copy_until_any(Boundary::TagBound)
        .to_ascii_lowercase();
    let _ = content.copy_until(">");
    if !content.is_at_end() {
        content.advance(1)?;
    }
    if name.is_empty() {
        warn_once("HTML Parser", "discarded a closing tag with no name");
        return Ok(());
    }
    // Index 0 is the root container and never matches a closer.
    let matched = open
        .iter()
        .rposition(|&id| document.tag_name(id) == Some(name.as_str()));
    match matched {
        Some(index) if index > 0 => open.truncate(index),
        _ => warn_once(
            "HTML Parser",
            &format!("discarded stray closing tag '</{name}>'"),
        ),
    }
    Ok(())
}

/// Collects the verbatim content of a raw-text element up to its matching
/// closer (compared ASCII case-insensitively), consuming the closer. A
/// `</` that opens anything else stays part of the content. EOF closes the
/// element.
fn capture_raw_text(content: &mut Content, name: &str) -> Result<String, LengthError> {
    let mut raw = String::new();
    loop {
        raw.push_str(&content.copy_until("</"));
        if content.is_at_end() {
            break;
        }
        let probe = content.read(2 + name.len());
        let matches_name = probe
            .get(2..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(name));
        // The closer's name must be followed by `>`, a blank or the end.
        let after = content.char_at(Some(content.position() + 2 + name.len()));
        let closes = matches_name
            && after.is_none_or(|c| c == '>' || Boundary::Blank.contains(c));
        if closes {
            content.advance(2 + name.len())?;
            let _ = content.copy_until(">");
            if !content.is_at_end() {
                content.advance(1)?;
            }
            break;
        }
        raw.push_str("</");
        content.advance(2)?;
    }
    Ok(raw)
}

/// Whether `name` is a usable tag name: letters, digits, `_`, `:` or `-`.
fn is_tag_name(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '-'))
}

/// Extracts the charset name from a `meta` declaration value.
fn charset_label(value: &str) -> &str {
    let label = value
        .find("charset=")
        .and_then(|index| value.get(index + "charset=".len()..))
        .map_or(value, |tail| tail.split(';').next().unwrap_or(tail));
    label.trim().trim_matches(|c| c == '"' || c == '\'')
}

/// Print the subtree under `id` to stdout, one node per line. Text runs
/// show newlines as `\n` and spaces as `·` so whitespace nodes stay visible.
pub fn print_tree(document: &Document, id: NodeId, indent: usize) {
    let prefix = "  ".repeat(indent);
    if let Some(node) = document.get(id) {
        match &node.data {
            NodeData::Element(tag) => {
                if tag.attributes().is_empty() {
                    println!("{prefix}<{}>", tag.name());
                } else {
                    let attrs: Vec<String> = tag
                        .attributes()
                        .iter()
                        .map(|(name, attribute)| {
                            attribute
                                .value
                                .as_ref()
                                .map_or_else(|| name.clone(), |value| format!("{name}=\"{value}\""))
                        })
                        .collect();
                    println!("{prefix}<{} {}>", tag.name(), attrs.join(" "));
                }
            }
            NodeData::Text(text) => {
                let display = text.raw().replace('\n', "\\n").replace(' ', "\u{00B7}");
                println!("{prefix}\"{display}\"");
            }
        }
        for child in document.child_iter(id) {
            print_tree(document, child, indent + 1);
        }
    }
}
