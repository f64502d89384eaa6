//! The loaded-page facade: one value owning the parsed tree.

use std::fmt;

use wombat_dom::{Document, DomError, NodeId};
use wombat_select::{EmptyResultError, Selector, select};

use crate::content::Content;
use crate::error::ParseError;
use crate::options::Options;
use crate::parser::DomParser;

/// A parsed page: the document tree plus query shortcuts rooted at its top.
///
/// ```
/// use wombat_html::{Dom, Options};
///
/// let dom = Dom::load_str("<div id='a'><p class='x y'>hi</p></div>", &Options::default())?;
/// let p = dom.find_first("div > p.x")?;
/// assert_eq!(dom.document().text(p)?, "hi");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Dom {
    document: Document,
}

impl Dom {
    /// Parses markup and detects its charset.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] as [`DomParser::parse`] does.
    pub fn load_str(html: &str, options: &Options) -> Result<Self, ParseError> {
        let parser = DomParser::new(options.clone());
        let mut content = Content::new(html);
        let mut document = parser.parse(&mut content, html.len())?;
        let _ = parser.detect_charset(options.default_charset(), &mut document);
        Ok(Self { document })
    }

    /// The root container's id.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.document.root()
    }

    /// The underlying document tree.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// The underlying document tree, mutably.
    pub const fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Every node matching `selector`, in discovery order.
    #[must_use]
    pub fn find(&self, selector: &str) -> Vec<NodeId> {
        select(&self.document, self.root(), selector)
    }

    /// The `n`th node matching `selector`, counting from zero.
    #[must_use]
    pub fn find_nth(&self, selector: &str, n: usize) -> Option<NodeId> {
        Selector::parse(selector).find_nth(&self.document, self.root(), n)
    }

    /// The first node matching `selector`.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyResultError`] when nothing matches.
    pub fn find_first(&self, selector: &str) -> Result<NodeId, EmptyResultError> {
        Selector::parse(selector).find_first(&self.document, self.root())
    }

    /// The element carrying `id="..."`, if any.
    #[must_use]
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_nth(&format!("#{id}"), 0)
    }

    /// Every element with the given tag name.
    #[must_use]
    pub fn get_elements_by_tag(&self, name: &str) -> Vec<NodeId> {
        self.find(name)
    }

    /// Every element carrying the given class.
    #[must_use]
    pub fn get_elements_by_class(&self, class: &str) -> Vec<NodeId> {
        self.find(&format!(".{class}"))
    }

    /// The root's first child.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NoChildren`] on an empty document.
    pub fn first_child(&self) -> Result<NodeId, DomError> {
        self.document.first_child(self.root())
    }

    /// The root's last child.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NoChildren`] on an empty document.
    pub fn last_child(&self) -> Result<NodeId, DomError> {
        self.document.last_child(self.root())
    }

    /// The root's children, head to tail.
    ///
    /// # Errors
    ///
    /// Returns [`DomError`] if the sibling chain is corrupt.
    pub fn children(&self) -> Result<Vec<NodeId>, DomError> {
        self.document.children(self.root())
    }

    /// Number of top-level nodes.
    #[must_use]
    pub fn count_children(&self) -> usize {
        self.document.count_children(self.root())
    }

    /// Whether the document has any top-level node.
    #[must_use]
    pub fn has_children(&self) -> bool {
        self.document.has_children(self.root())
    }
}

/// Renders the page as markup (the root's inner markup).
impl fmt::Display for Dom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let markup = self
            .document
            .inner_markup(self.root())
            .map_err(|_| fmt::Error)?;
        write!(f, "{markup}")
    }
}
