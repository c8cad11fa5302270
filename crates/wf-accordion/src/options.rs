//! Initialization options.

use serde::{Deserialize, Serialize};
use wf_accordion_dom::SelectorList;

use crate::error::{AccordionError, Result};

/// Attribute that freezes an accordion in its initial state.
pub const DISABLED_ATTRIBUTE: &str = "data-wf-accordion-disabled";

/// Attribute that expands an accordion on load.
pub const EXPANDED_ATTRIBUTE: &str = "data-wf-accordion-expanded";

/// Selectors and switches for [`wfaccordions_init`](crate::wfaccordions_init).
///
/// Field names follow the JavaScript widget's option object, so a host can
/// pass the same JSON it already renders for the page:
///
/// ```
/// use wf_accordion::AccordionOptions;
///
/// let options = AccordionOptions::from_json(r#"{ "accordionGroup": ".faq", "disableHashUpdate": true }"#)?;
/// assert_eq!(options.accordion_group, ".faq");
/// assert_eq!(options.accordion_root, ".js-accordion");
/// assert!(options.disable_hash_update);
/// # Ok::<(), wf_accordion::AccordionError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccordionOptions {
    /// Container of sibling accordions.
    pub accordion_group: String,
    /// One accordion.
    pub accordion_root: String,
    /// Header inside the root.
    pub accordion_header: String,
    /// Trigger placeholder inside the header.
    pub accordion_trigger: String,
    /// Collapsible panel inside the root.
    pub accordion_panel: String,
    /// Keep the URL fragment untouched on toggle.
    pub disable_hash_update: bool,
}

impl Default for AccordionOptions {
    fn default() -> Self {
        Self {
            accordion_group: ".js-accordion-group".to_string(),
            accordion_root: ".js-accordion".to_string(),
            accordion_header: ".js-accordion__header".to_string(),
            accordion_trigger: ".js-accordion__trigger".to_string(),
            accordion_panel: ".js-accordion__panel".to_string(),
            disable_hash_update: false,
        }
    }
}

impl AccordionOptions {
    /// Create the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the group selector.
    pub fn with_group(mut self, selector: impl Into<String>) -> Self {
        self.accordion_group = selector.into();
        self
    }

    /// Set the root selector.
    pub fn with_root(mut self, selector: impl Into<String>) -> Self {
        self.accordion_root = selector.into();
        self
    }

    /// Set the header selector.
    pub fn with_header(mut self, selector: impl Into<String>) -> Self {
        self.accordion_header = selector.into();
        self
    }

    /// Set the trigger selector.
    pub fn with_trigger(mut self, selector: impl Into<String>) -> Self {
        self.accordion_trigger = selector.into();
        self
    }

    /// Set the panel selector.
    pub fn with_panel(mut self, selector: impl Into<String>) -> Self {
        self.accordion_panel = selector.into();
        self
    }

    /// Enable or disable fragment updates on toggle.
    pub fn with_hash_update(mut self, enabled: bool) -> Self {
        self.disable_hash_update = !enabled;
        self
    }

    /// Parse every selector.
    pub fn compile(&self) -> Result<Selectors> {
        let parse = |option: &'static str, selector: &str| {
            SelectorList::parse(selector).map_err(|err| AccordionError::configuration(option, err))
        };
        Ok(Selectors {
            group: parse("accordionGroup", &self.accordion_group)?,
            root: parse("accordionRoot", &self.accordion_root)?,
            header: parse("accordionHeader", &self.accordion_header)?,
            trigger: parse("accordionTrigger", &self.accordion_trigger)?,
            panel: parse("accordionPanel", &self.accordion_panel)?,
            update_fragment: !self.disable_hash_update,
        })
    }
}

/// Parsed [`AccordionOptions`].
#[derive(Debug, Clone)]
pub struct Selectors {
    /// Group containers.
    pub group: SelectorList,
    /// Accordion roots.
    pub root: SelectorList,
    /// Headers.
    pub header: SelectorList,
    /// Trigger placeholders, and triggers after enhancement.
    pub trigger: SelectorList,
    /// Panels.
    pub panel: SelectorList,
    /// Whether toggles write the URL fragment.
    pub update_fragment: bool,
}
