//! Parse configuration.

/// Elements closed implicitly because they never hold content, per
/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
/// plus the legacy names this engine has always treated as childless.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "br", "col", "embed", "hr", "img", "input", "keygen", "link",
    "meta", "param", "source", "spacer", "track", "wbr",
];

/// Elements whose content is captured as-is up to the matching closer, per
/// [§ 13.1.2.6 Restrictions on the contents of raw text elements](https://html.spec.whatwg.org/multipage/syntax.html#cdata-rcdata-restrictions).
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Knobs for a single parse run.
///
/// Starts from forgiving defaults; the consuming `with_*` builders follow
/// the usual chain style:
///
/// ```
/// use wombat_html::Options;
///
/// let options = Options::default()
///     .with_strict(true)
///     .with_remove_double_space(false);
/// assert!(options.is_strict());
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    strict: bool,
    whitespace_text_nodes: bool,
    remove_double_space: bool,
    special_chars_decode: bool,
    enforce_encoding: Option<String>,
    default_charset: String,
    self_closing: Vec<String>,
    raw_text: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            strict: false,
            whitespace_text_nodes: true,
            remove_double_space: true,
            special_chars_decode: false,
            enforce_encoding: None,
            default_charset: "UTF-8".to_owned(),
            self_closing: VOID_ELEMENTS.iter().map(|&name| name.to_owned()).collect(),
            raw_text: RAW_TEXT_ELEMENTS.iter().map(|&name| name.to_owned()).collect(),
        }
    }
}

impl Options {
    /// Fail on malformed markup instead of repairing it.
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Keep (default) or drop text nodes that are pure whitespace.
    #[must_use]
    pub const fn with_whitespace_text_nodes(mut self, keep: bool) -> Self {
        self.whitespace_text_nodes = keep;
        self
    }

    /// Collapse whitespace runs in text to a single space (default on).
    #[must_use]
    pub const fn with_remove_double_space(mut self, collapse: bool) -> Self {
        self.remove_double_space = collapse;
        self
    }

    /// Decode the basic character references in text and attribute values.
    #[must_use]
    pub const fn with_special_chars_decode(mut self, decode: bool) -> Self {
        self.special_chars_decode = decode;
        self
    }

    /// Skip charset detection and pin the document to this encoding.
    #[must_use]
    pub fn with_enforce_encoding(mut self, encoding: Option<&str>) -> Self {
        self.enforce_encoding = encoding.map(str::to_owned);
        self
    }

    /// Charset assumed when the document does not declare one.
    #[must_use]
    pub fn with_default_charset(mut self, charset: &str) -> Self {
        self.default_charset = charset.to_owned();
        self
    }

    /// Replace the set of implicitly self-closing element names.
    #[must_use]
    pub fn with_self_closing<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.self_closing = names
            .into_iter()
            .map(|name| name.into().to_ascii_lowercase())
            .collect();
        self
    }

    /// Replace the set of raw-text element names.
    #[must_use]
    pub fn with_raw_text<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.raw_text = names
            .into_iter()
            .map(|name| name.into().to_ascii_lowercase())
            .collect();
        self
    }

    /// Whether malformed markup fails the parse.
    #[must_use]
    pub const fn is_strict(&self) -> bool {
        self.strict
    }

    /// Whether pure-whitespace text runs become nodes.
    #[must_use]
    pub const fn keeps_whitespace_text_nodes(&self) -> bool {
        self.whitespace_text_nodes
    }

    /// Whether whitespace runs in text collapse to single spaces.
    #[must_use]
    pub const fn removes_double_space(&self) -> bool {
        self.remove_double_space
    }

    /// Whether text and attribute values decode basic character references.
    #[must_use]
    pub const fn decodes_special_chars(&self) -> bool {
        self.special_chars_decode
    }

    /// The pinned encoding, when charset detection is bypassed.
    #[must_use]
    pub fn enforce_encoding(&self) -> Option<&str> {
        self.enforce_encoding.as_deref()
    }

    /// The charset assumed without a declaration.
    #[must_use]
    pub fn default_charset(&self) -> &str {
        &self.default_charset
    }

    /// Whether `name` closes implicitly (lowercased names expected).
    #[must_use]
    pub fn is_self_closing(&self, name: &str) -> bool {
        self.self_closing.iter().any(|entry| entry == name)
    }

    /// Whether `name` captures its content verbatim.
    #[must_use]
    pub fn is_raw_text(&self, name: &str) -> bool {
        self.raw_text.iter().any(|entry| entry == name)
    }
}
