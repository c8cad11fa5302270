//! Accessible accordions, progressively enhanced from plain markup.
//!
//! Authors write a header with a trigger placeholder and a panel. At
//! initialization the placeholder becomes a `<button type="button">`, triggers
//! and panels are linked through ARIA attributes, and the trigger id doubles as
//! a URL fragment so an accordion can be linked to directly.
//!
//! - [`Accordions`]: the page-lifetime registry, with click, keydown and
//!   deep-link dispatch
//! - [`AccordionGroup`]: sibling accordions and their arrow-key navigation
//! - [`Accordion`]: one trigger/panel pair and its state
//! - [`AccordionOptions`]: selectors and switches, also accepted as JSON
//!
//! # Example
//!
//! ```
//! use wf_accordion::prelude::*;
//!
//! let mut page = Page::from_html(
//!     r#"<div class="js-accordion-group">
//!          <div class="js-accordion">
//!            <div class="js-accordion__header"><div class="js-accordion__trigger">Title</div></div>
//!            <div class="js-accordion__panel">Text</div>
//!          </div>
//!        </div>"#,
//!     "https://example.org/faq",
//! )?;
//!
//! let mut accordions = Accordions::new();
//! let mounted = wfaccordions_init(&mut accordions, &mut page, None, Some(|event: &MountedEvent| {
//!     assert_eq!(event.group_count, 1);
//! }))?;
//! assert_eq!(mounted.accordions, ["title"]);
//!
//! let trigger = accordions.get("title").expect("accordion").trigger();
//! assert_eq!(page.document.attribute(trigger, "aria-controls"), Some("title-panel"));
//!
//! accordions.click(&mut page, trigger)?;
//! assert_eq!(page.document.attribute(trigger, "aria-expanded"), Some("true"));
//! assert_eq!(page.location.href(), "https://example.org/faq#title");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod accordion;
pub mod attributes;
pub mod enhance;
mod error;
pub mod fragment;
mod group;
mod init;
mod options;

pub use accordion::Accordion;
pub use error::{AccordionError, AccordionPart, Result};
pub use group::{AccordionGroup, SkippedAccordion};
pub use init::{Accordions, MountedEvent, ToggleEvent, wfaccordions_init};
pub use options::{AccordionOptions, DISABLED_ATTRIBUTE, EXPANDED_ATTRIBUTE, Selectors};

pub use wf_accordion_core::{ResolvedIds, SlugRegistry, slugify};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::accordion::Accordion;
    pub use crate::error::{AccordionError, Result};
    pub use crate::group::AccordionGroup;
    pub use crate::init::{Accordions, MountedEvent, ToggleEvent, wfaccordions_init};
    pub use crate::options::AccordionOptions;
    pub use wf_accordion_dom::prelude::*;
}
