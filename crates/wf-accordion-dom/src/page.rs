//! A document together with its address bar.

use crate::document::Document;
use crate::error::Result;
use crate::location::{AddressBar, MemoryLocation};

/// Everything the widget needs from a browsing context.
///
/// ```
/// use wf_accordion_dom::{AddressBar, Page};
///
/// let page = Page::from_html("<p>hello</p>", "https://example.org/#intro")?;
/// assert_eq!(page.location.fragment().as_deref(), Some("intro"));
/// # Ok::<(), wf_accordion_dom::DomError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Page<L: AddressBar = MemoryLocation> {
    /// The document tree.
    pub document: Document,
    /// The address bar.
    pub location: L,
}

impl<L: AddressBar> Page<L> {
    /// Combine a document with an address bar.
    pub fn new(document: Document, location: L) -> Self {
        Self { document, location }
    }
}

impl Page<MemoryLocation> {
    /// Parse `html` and open it at `url`.
    pub fn from_html(html: &str, url: &str) -> Result<Self> {
        Ok(Self {
            document: Document::parse(html)?,
            location: MemoryLocation::new(url)?,
        })
    }
}
