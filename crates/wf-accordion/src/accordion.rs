//! The accordion state machine.

use wf_accordion_core::logging::targets;
use wf_accordion_core::{SlugRegistry, slugify};
use wf_accordion_dom::{AddressBar, Document, NodeId, Page, Sanitizer};

use crate::enhance::enhance;
use crate::error::{AccordionError, AccordionPart, Result};
use crate::fragment::{clear_fragment, read_fragment, write_fragment};
use crate::options::{DISABLED_ATTRIBUTE, EXPANDED_ATTRIBUTE, Selectors};

/// One trigger/panel pair.
///
/// The expanded flag is the single source of truth. `aria-expanded` on the
/// trigger and `aria-hidden` on the panel are written from it after every
/// transition and never read back.
///
/// Disabled accordions keep the state they were built with; every transition
/// request is refused.
#[derive(Debug, Clone)]
pub struct Accordion {
    root: NodeId,
    trigger: NodeId,
    panel: Option<NodeId>,
    identifier: String,
    panel_identifier: String,
    disabled: bool,
    expanded: bool,
    deep_link_target: bool,
    update_fragment: bool,
}

impl Accordion {
    /// Enhance the accordion at `root` and wire up its ARIA relationships.
    ///
    /// If the URL fragment names this accordion and it is not disabled, it
    /// starts expanded and its trigger receives focus.
    pub fn new<L: AddressBar>(
        page: &mut Page<L>,
        root: NodeId,
        selectors: &Selectors,
        registry: &SlugRegistry,
        sanitizer: &dyn Sanitizer,
    ) -> Result<Self> {
        let doc = &mut page.document;

        let panel = doc.query_selector(root, &selectors.panel);
        let header = doc.query_selector(root, &selectors.header).ok_or_else(|| {
            AccordionError::structure(AccordionPart::Header, selectors.header.to_string())
        })?;
        let placeholder = doc.query_selector(header, &selectors.trigger).ok_or_else(|| {
            AccordionError::structure(AccordionPart::Trigger, selectors.trigger.to_string())
        })?;

        let base = match doc.attribute(root, "id").filter(|id| !id.is_empty()) {
            Some(id) => id.to_string(),
            None => slugify(&doc.text_content(placeholder)),
        };

        // Identifiers are only reserved once the trigger exists.
        let trigger = enhance(doc, root, selectors, sanitizer)?;
        let ids = registry.resolve(&base);
        doc.remove_attribute(root, "id");

        let disabled = doc.has_attribute(root, DISABLED_ATTRIBUTE);
        let deep_link_target = ids.trigger == read_fragment(&page.location);
        let expanded =
            doc.has_attribute(root, EXPANDED_ATTRIBUTE) || (deep_link_target && !disabled);

        let accordion = Self {
            root,
            trigger,
            panel,
            identifier: ids.trigger,
            panel_identifier: ids.panel,
            disabled,
            expanded,
            deep_link_target,
            update_fragment: selectors.update_fragment,
        };

        doc.set_attribute(trigger, "id", accordion.identifier.as_str())?;
        doc.set_attribute(trigger, "aria-controls", accordion.panel_identifier.as_str())?;
        doc.set_attribute(trigger, "aria-disabled", bool_attr(disabled))?;
        if let Some(panel) = panel {
            doc.set_attribute(panel, "id", accordion.panel_identifier.as_str())?;
            doc.set_attribute(panel, "aria-labelledby", accordion.identifier.as_str())?;
        }
        accordion.write_state(doc)?;

        if deep_link_target && !disabled {
            doc.focus(trigger);
        }

        tracing::debug!(
            target: targets::STATE,
            id = %accordion.identifier,
            disabled,
            expanded,
            has_panel = panel.is_some(),
            "accordion constructed"
        );

        Ok(accordion)
    }

    /// The accordion root element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The enhanced trigger button.
    pub fn trigger(&self) -> NodeId {
        self.trigger
    }

    /// The panel, if the markup has one.
    pub fn panel(&self) -> Option<NodeId> {
        self.panel
    }

    /// The trigger `id`, also used as URL fragment.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The panel `id`.
    pub fn panel_identifier(&self) -> &str {
        &self.panel_identifier
    }

    /// Whether the accordion is expanded.
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Whether the accordion refuses transitions.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Whether the URL fragment named this accordion at construction.
    pub fn is_deep_link_target(&self) -> bool {
        self.deep_link_target
    }

    /// Expand. Returns false if nothing changed.
    pub fn expand(&mut self, doc: &mut Document) -> Result<bool> {
        self.transition(doc, true)
    }

    /// Collapse. Returns false if nothing changed.
    pub fn collapse(&mut self, doc: &mut Document) -> Result<bool> {
        self.transition(doc, false)
    }

    /// Flip the state and, unless fragment updates are off, keep the URL
    /// fragment in step with it. Returns false for disabled accordions.
    pub fn toggle<L: AddressBar>(&mut self, page: &mut Page<L>) -> Result<bool> {
        if !self.transition(&mut page.document, !self.expanded)? {
            return Ok(false);
        }
        if self.update_fragment {
            self.sync_fragment(&mut page.location);
        }
        Ok(true)
    }

    /// Write or clear the fragment depending on the current state.
    pub fn sync_fragment<L: AddressBar + ?Sized>(&self, location: &mut L) {
        let current = read_fragment(location);
        if self.expanded && current != self.identifier {
            write_fragment(location, &self.identifier);
        } else if !self.expanded && current == self.identifier {
            clear_fragment(location);
        }
    }

    fn transition(&mut self, doc: &mut Document, expanded: bool) -> Result<bool> {
        if self.disabled {
            tracing::trace!(target: targets::STATE, id = %self.identifier, "disabled, ignoring transition");
            return Ok(false);
        }
        if self.expanded == expanded {
            return Ok(false);
        }
        self.expanded = expanded;
        self.write_state(doc)?;
        tracing::trace!(target: targets::STATE, id = %self.identifier, expanded, "transition");
        Ok(true)
    }

    fn write_state(&self, doc: &mut Document) -> Result<()> {
        doc.set_attribute(self.trigger, "aria-expanded", bool_attr(self.expanded))?;
        if let Some(panel) = self.panel {
            doc.set_attribute(panel, "aria-hidden", bool_attr(!self.expanded))?;
        }
        Ok(())
    }
}

fn bool_attr(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
