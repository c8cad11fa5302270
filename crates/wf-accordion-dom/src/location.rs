//! Address bar abstraction.

use percent_encoding::percent_decode_str;
use url::Url;
use wf_accordion_core::logging::targets;

use crate::error::{DomError, Result};

/// The part of `window.location`/`window.history` the accordion touches.
pub trait AddressBar {
    /// Current fragment without the leading `#`, percent-decoded, or `None`
    /// if there is none.
    fn fragment(&self) -> Option<String>;

    /// Whether the fragment can be changed without a new history entry.
    fn supports_replace_state(&self) -> bool;

    /// Replace the current history entry so that its fragment is `fragment`
    /// (`None` removes the fragment).
    fn replace_fragment(&mut self, fragment: Option<&str>);

    /// Navigate to `#fragment`, creating a history entry.
    fn assign_fragment(&mut self, fragment: &str);
}

/// In-memory address bar with a history stack.
///
/// ```
/// use wf_accordion_dom::{AddressBar, MemoryLocation};
///
/// let mut location = MemoryLocation::new("https://example.org/faq")?;
/// location.replace_fragment(Some("shipping"));
/// assert_eq!(location.href(), "https://example.org/faq#shipping");
/// assert_eq!(location.history_len(), 1);
///
/// location.assign_fragment("returns");
/// assert_eq!(location.history_len(), 2);
/// # Ok::<(), wf_accordion_dom::DomError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MemoryLocation {
    current: Url,
    /// Entries before `current`, oldest first.
    previous: Vec<Url>,
    replace_state: bool,
}

impl MemoryLocation {
    /// Create an address bar showing `url`.
    pub fn new(url: &str) -> Result<Self> {
        let current = Url::parse(url).map_err(|err| DomError::invalid_url(url, err))?;
        Ok(Self {
            current,
            previous: Vec::new(),
            replace_state: true,
        })
    }

    /// Disable replace-state support, so every fragment change adds a history entry.
    pub fn without_replace_state(mut self) -> Self {
        self.replace_state = false;
        self
    }

    /// The full current URL.
    pub fn href(&self) -> &str {
        self.current.as_str()
    }

    /// The current URL.
    pub fn url(&self) -> &Url {
        &self.current
    }

    /// Number of history entries, including the current one.
    pub fn history_len(&self) -> usize {
        self.previous.len() + 1
    }

    /// Go back one entry. Returns false if there is nothing to go back to.
    pub fn back(&mut self) -> bool {
        match self.previous.pop() {
            Some(url) => {
                self.current = url;
                true
            }
            None => false,
        }
    }
}

impl AddressBar for MemoryLocation {
    fn fragment(&self) -> Option<String> {
        self.current
            .fragment()
            .filter(|fragment| !fragment.is_empty())
            .map(|fragment| percent_decode_str(fragment).decode_utf8_lossy().into_owned())
    }

    fn supports_replace_state(&self) -> bool {
        self.replace_state
    }

    fn replace_fragment(&mut self, fragment: Option<&str>) {
        tracing::trace!(target: targets::DOM, ?fragment, "replacing fragment");
        self.current.set_fragment(fragment);
    }

    fn assign_fragment(&mut self, fragment: &str) {
        tracing::trace!(target: targets::DOM, fragment, "assigning fragment");
        let mut next = self.current.clone();
        next.set_fragment(Some(fragment));
        self.previous.push(std::mem::replace(&mut self.current, next));
    }
}
