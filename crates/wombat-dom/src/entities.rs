//! Decoding of the five basic HTML character references.
//!
//! This is deliberately not a full reference decoder: it covers exactly the
//! set produced by escaping markup-significant characters (`&amp;` `&lt;`
//! `&gt;` `&quot;` `&#039;`), which is what documents round-tripped through
//! template engines most commonly contain.

/// Decode `&amp;`, `&lt;`, `&gt;`, `&quot;` and `&#039;` in one pass.
///
/// Everything else, including unknown or truncated references, is copied
/// through untouched.
#[must_use]
pub fn decode_special_chars(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(at) = rest.find('&') {
        out.push_str(&rest[..at]);
        rest = &rest[at..];
        let (decoded, len) = if rest.starts_with("&amp;") {
            ('&', 5)
        } else if rest.starts_with("&lt;") {
            ('<', 4)
        } else if rest.starts_with("&gt;") {
            ('>', 4)
        } else if rest.starts_with("&quot;") {
            ('"', 6)
        } else if rest.starts_with("&#039;") {
            ('\'', 6)
        } else {
            ('&', 1)
        };
        out.push(decoded);
        rest = &rest[len..];
    }
    out.push_str(rest);
    out
}
