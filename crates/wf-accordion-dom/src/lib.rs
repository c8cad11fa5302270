//! Host document model for wf-accordion.
//!
//! The accordion widget enhances author markup in place. This crate provides
//! the parts of a browsing context it needs, modelled after the browser APIs:
//!
//! - **Document**: an arena tree with ordered attributes, `innerHTML`-style
//!   parsing and serialization, selector queries and focus
//! - **Selectors**: CSS selector parsing (via `cssparser`) and matching
//! - **Sanitizer**: cleans markup before it is moved into a trigger
//! - **Address bar**: fragment access with or without history replacement
//! - **Keyboard events**: key names, legacy key codes and modifiers
//!
//! # Example
//!
//! ```
//! use wf_accordion_dom::prelude::*;
//!
//! let mut page = Page::from_html(
//!     r#"<div class="js-accordion"><div class="js-accordion__header">FAQ</div></div>"#,
//!     "https://example.org/",
//! )?;
//!
//! let header: SelectorList = ".js-accordion__header".parse()?;
//! let node = page.document.query_selector(page.document.root(), &header).expect("header");
//! page.document.set_attribute(node, "role", "heading")?;
//!
//! assert_eq!(
//!     page.document.outer_html(node),
//!     r#"<div class="js-accordion__header" role="heading">FAQ</div>"#
//! );
//! # Ok::<(), wf_accordion_dom::DomError>(())
//! ```

mod document;
mod error;
pub mod events;
mod html;
pub mod location;
mod node;
mod page;
pub mod sanitize;
pub mod selector;

pub use document::Document;
pub use error::{DomError, Result};
pub use events::{Key, KeyEvent, KeyboardModifiers};
pub use location::{AddressBar, MemoryLocation};
pub use node::{Attribute, Attributes, ElementData, NodeData, NodeId};
pub use page::Page;
pub use sanitize::{HtmlSanitizer, Sanitizer};
pub use selector::SelectorList;

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::document::Document;
    pub use crate::error::{DomError, Result};
    pub use crate::events::{Key, KeyEvent, KeyboardModifiers};
    pub use crate::location::{AddressBar, MemoryLocation};
    pub use crate::node::NodeId;
    pub use crate::page::Page;
    pub use crate::sanitize::{HtmlSanitizer, Sanitizer};
    pub use crate::selector::SelectorList;
}
