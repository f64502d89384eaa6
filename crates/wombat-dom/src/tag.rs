//! Element tags: name, ordered attribute list, and markup rendering.

use crate::entities::decode_special_chars;
use crate::error::DomError;

/// One attribute value as it appeared in (or will be written to) markup.
///
/// [§ 13.1.2.3 Attributes](https://html.spec.whatwg.org/multipage/syntax.html#attributes-2)
/// distinguishes the empty, unquoted, single-quoted and double-quoted
/// syntaxes; the tree keeps the value and the quote style so a render can
/// reproduce what was parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// The attribute value. `None` is the empty attribute syntax
    /// (present, valueless), which is distinct from an absent attribute.
    pub value: Option<String>,
    /// Render with double quotes (`true`, the default) or single quotes.
    pub double_quote: bool,
}

impl Attribute {
    /// A double-quoted attribute with the given value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            double_quote: true,
        }
    }

    /// A single-quoted attribute with the given value.
    #[must_use]
    pub fn single_quoted(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            double_quote: false,
        }
    }

    /// A valueless attribute (`<input disabled>`).
    #[must_use]
    pub const fn valueless() -> Self {
        Self {
            value: None,
            double_quote: true,
        }
    }
}

/// The tag of an element node: lower-cased name, attributes in source order,
/// and the self-closing flags controlling how the element renders.
///
/// Attribute names are lower-cased on every write; setting an existing name
/// replaces its value in place, keeping the original position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    name: String,
    attributes: Vec<(String, Attribute)>,
    self_closing: bool,
    trailing_slash: bool,
    special_chars_decode: bool,
}

impl Tag {
    /// Create a tag with the given name (lower-cased) and no attributes.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            attributes: Vec::new(),
            self_closing: false,
            trailing_slash: false,
            special_chars_decode: false,
        }
    }

    /// Mark the tag self-closing (void): it renders without a closing tag.
    ///
    /// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#elements-2)
    /// "Void elements only have a start tag; end tags must not be specified
    /// for void elements."
    #[must_use]
    pub const fn with_self_closing(mut self) -> Self {
        self.self_closing = true;
        self
    }

    /// Also render the XML-style ` />` close inside the start tag.
    #[must_use]
    pub const fn with_trailing_slash(mut self) -> Self {
        self.trailing_slash = true;
        self
    }

    /// Decode the basic character references in attribute values as they are
    /// stored. Affects attributes set after this call.
    #[must_use]
    pub const fn with_special_chars_decode(mut self, decode: bool) -> Self {
        self.special_chars_decode = decode;
        self
    }

    /// The lower-cased tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the element renders without a closing tag.
    #[must_use]
    pub const fn is_self_closing(&self) -> bool {
        self.self_closing
    }

    /// Whether the start tag renders with a trailing ` />`.
    #[must_use]
    pub const fn has_trailing_slash(&self) -> bool {
        self.trailing_slash
    }

    /// Change the self-closing flag.
    pub const fn set_self_closing(&mut self, self_closing: bool) {
        self.self_closing = self_closing;
    }

    /// Change the trailing-slash render flag.
    pub const fn set_trailing_slash(&mut self, trailing_slash: bool) {
        self.trailing_slash = trailing_slash;
    }

    /// Set one attribute. The name is lower-cased; an existing attribute of
    /// the same name is replaced in place, otherwise the attribute is
    /// appended at the end of the list.
    pub fn set_attribute(&mut self, name: &str, mut attribute: Attribute) {
        if self.special_chars_decode {
            attribute.value = attribute.value.map(|v| decode_special_chars(&v));
        }
        let name = name.to_ascii_lowercase();
        if let Some(slot) = self.attributes.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = attribute;
        } else {
            self.attributes.push((name, attribute));
        }
    }

    /// Set several attributes at once, in iteration order.
    pub fn set_attributes<'a, I>(&mut self, attributes: I)
    where
        I: IntoIterator<Item = (&'a str, Attribute)>,
    {
        for (name, attribute) in attributes {
            self.set_attribute(name, attribute);
        }
    }

    /// Fail-fast attribute lookup.
    ///
    /// # Errors
    /// [`DomError::AttributeNotFound`] when no attribute of that name exists.
    pub fn attribute(&self, name: &str) -> Result<&Attribute, DomError> {
        self.try_attribute(name).ok_or_else(|| DomError::AttributeNotFound {
            tag: self.name.clone(),
            name: name.to_ascii_lowercase(),
        })
    }

    /// Attribute lookup returning `None` when absent.
    #[must_use]
    pub fn try_attribute(&self, name: &str) -> Option<&Attribute> {
        let name = name.to_ascii_lowercase();
        self.attributes.iter().find(|(n, _)| *n == name).map(|(_, a)| a)
    }

    /// The value of an attribute; `None` when the attribute is absent or
    /// valueless.
    #[must_use]
    pub fn attribute_value(&self, name: &str) -> Option<&str> {
        self.try_attribute(name).and_then(|a| a.value.as_deref())
    }

    /// Whether an attribute of that name is present (even valueless).
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.try_attribute(name).is_some()
    }

    /// Remove one attribute, returning it if it was present.
    pub fn remove_attribute(&mut self, name: &str) -> Option<Attribute> {
        let name = name.to_ascii_lowercase();
        let at = self.attributes.iter().position(|(n, _)| *n == name)?;
        Some(self.attributes.remove(at).1)
    }

    /// Remove every attribute.
    pub fn remove_all_attributes(&mut self) {
        self.attributes.clear();
    }

    /// All attributes in source order.
    #[must_use]
    pub fn attributes(&self) -> &[(String, Attribute)] {
        &self.attributes
    }

    /// The `style` attribute parsed into `(property, value)` pairs, in
    /// declaration order. Empty when the attribute is absent or valueless.
    #[must_use]
    pub fn style_attributes(&self) -> Vec<(String, String)> {
        let Some(style) = self.attribute_value("style") else {
            return Vec::new();
        };
        style
            .split(';')
            .filter_map(|declaration| {
                let (property, value) = declaration.split_once(':')?;
                let property = property.trim();
                if property.is_empty() {
                    return None;
                }
                Some((property.to_owned(), value.trim().to_owned()))
            })
            .collect()
    }

    /// Set one declaration inside the `style` attribute, preserving the
    /// order of the others and creating the attribute if needed.
    pub fn set_style_attribute(&mut self, property: &str, value: &str) {
        let mut declarations = self.style_attributes();
        let property = property.trim();
        if let Some(slot) = declarations.iter_mut().find(|(p, _)| p == property) {
            slot.1 = value.trim().to_owned();
        } else {
            declarations.push((property.to_owned(), value.trim().to_owned()));
        }
        let mut rendered = String::new();
        for (p, v) in &declarations {
            rendered.push_str(p);
            rendered.push(':');
            rendered.push_str(v);
            rendered.push(';');
        }
        self.set_attribute("style", Attribute::new(rendered));
    }

    /// Render the start tag, including attributes with their recorded quote
    /// styles and the ` />` close when both self-closing flags are set.
    #[must_use]
    pub fn opening_markup(&self) -> String {
        let mut out = String::with_capacity(self.name.len() + 2);
        out.push('<');
        out.push_str(&self.name);
        for (name, attribute) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            if let Some(value) = &attribute.value {
                let quote = if attribute.double_quote { '"' } else { '\'' };
                out.push('=');
                out.push(quote);
                out.push_str(value);
                out.push(quote);
            }
        }
        if self.self_closing && self.trailing_slash {
            out.push_str(" />");
        } else {
            out.push('>');
        }
        out
    }

    /// Render the end tag; empty for a self-closing element.
    #[must_use]
    pub fn closing_markup(&self) -> String {
        if self.self_closing {
            String::new()
        } else {
            format!("</{}>", self.name)
        }
    }
}
