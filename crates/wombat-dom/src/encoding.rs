//! Character-set conversion installed on a document after charset detection.
//!
//! The engine works on Rust strings, which are always UTF-8, so conversions
//! whose target is the UTF-8 family are the identity. A conversion between
//! two distinct legacy charsets cannot be performed here; the text is passed
//! through unchanged and a warning is emitted once per label pair.

use wombat_common::warning::warn_once;

/// A source/target charset pair propagated to every text node of a document.
///
/// Constructed by the charset-detection hook with both labels set to the
/// document's default charset, then narrowed via [`set_from`](Self::set_from)
/// when a `meta[charset]` declaration (or an enforced override) is found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoding {
    from: String,
    to: String,
}

impl Encoding {
    /// Create an identity encoding with both labels set to `default`.
    #[must_use]
    pub fn new(default: &str) -> Self {
        Self {
            from: default.trim().to_owned(),
            to: default.trim().to_owned(),
        }
    }

    /// The charset the document claims to be encoded in.
    #[must_use]
    pub fn from_label(&self) -> &str {
        &self.from
    }

    /// The charset text is converted to on access.
    #[must_use]
    pub fn to_label(&self) -> &str {
        &self.to
    }

    /// Set the source charset label.
    pub fn set_from(&mut self, label: &str) {
        self.from = label.trim().to_owned();
    }

    /// Set the target charset label.
    pub fn set_to(&mut self, label: &str) {
        self.to = label.trim().to_owned();
    }

    /// Convert `text` from the source to the target charset.
    ///
    /// Identity when the labels agree or when the source is ASCII-compatible
    /// and the target is the UTF-8 family; otherwise the text is returned
    /// unchanged with a one-time warning.
    #[must_use]
    pub fn convert(&self, text: &str) -> String {
        let from = normalize(&self.from);
        let to = normalize(&self.to);
        if from != to && !(is_utf8_target(&to) && is_utf8_compatible(&from)) {
            warn_once(
                "Encoding",
                &format!("cannot convert from '{}' to '{}'; text passed through", self.from, self.to),
            );
        }
        text.to_owned()
    }
}

/// Lower-case a label and strip the separators charset names vary on.
fn normalize(label: &str) -> String {
    label
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn is_utf8_target(normalized: &str) -> bool {
    normalized == "utf8"
}

fn is_utf8_compatible(normalized: &str) -> bool {
    matches!(normalized, "utf8" | "usascii" | "ascii")
}
