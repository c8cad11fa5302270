//! Groups of sibling accordions and their keyboard navigation.

use wf_accordion_core::SlugRegistry;
use wf_accordion_core::logging::{span_names, targets};
use wf_accordion_dom::{AddressBar, Document, Key, KeyEvent, NodeId, Page, Sanitizer};

use crate::accordion::Accordion;
use crate::error::{AccordionError, Result};
use crate::options::Selectors;

/// An accordion that could not be built.
#[derive(Debug)]
pub struct SkippedAccordion {
    /// The malformed root.
    pub root: NodeId,
    /// Why it was skipped.
    pub error: AccordionError,
}

/// The accordions that are direct children of one group container.
///
/// Accordions inside a nested group belong to that group, so arrow keys only
/// ever move between siblings.
#[derive(Debug, Clone)]
pub struct AccordionGroup {
    container: NodeId,
    accordions: Vec<Accordion>,
    /// Roots skipped as malformed; they are not retried.
    malformed: Vec<NodeId>,
}

impl AccordionGroup {
    /// An empty group for `container`. Call [`build`](Self::build) to fill it.
    pub fn new(container: NodeId) -> Self {
        Self {
            container,
            accordions: Vec::new(),
            malformed: Vec::new(),
        }
    }

    /// Build every accordion whose root is a direct child of the container
    /// and that this group does not manage yet.
    ///
    /// Malformed accordions are skipped and returned. Any other failure stops
    /// the build, but the accordions built before it stay in the group, so a
    /// later call only retries the remaining roots.
    pub fn build<L: AddressBar>(
        &mut self,
        page: &mut Page<L>,
        selectors: &Selectors,
        registry: &SlugRegistry,
        sanitizer: &dyn Sanitizer,
    ) -> Result<Vec<SkippedAccordion>> {
        let _span =
            tracing::debug_span!(target: targets::INIT, span_names::GROUP, container = ?self.container)
                .entered();

        let roots: Vec<NodeId> = page
            .document
            .element_children(self.container)
            .into_iter()
            .filter(|&child| page.document.matches(child, &selectors.root))
            .filter(|&child| !self.manages(child))
            .collect();

        let mut skipped = Vec::new();
        let mut failure = None;
        for root in roots {
            match Accordion::new(page, root, selectors, registry, sanitizer) {
                Ok(accordion) => self.accordions.push(accordion),
                Err(error) if error.is_structure() => {
                    tracing::warn!(target: targets::INIT, %error, "skipping malformed accordion");
                    self.malformed.push(root);
                    skipped.push(SkippedAccordion { root, error });
                }
                Err(error) => {
                    failure = Some(error);
                    break;
                }
            }
        }

        // Retried roots may land between existing ones.
        let order = page.document.element_children(self.container);
        self.accordions
            .sort_by_key(|a| order.iter().position(|&child| child == a.root()));

        tracing::debug!(
            target: targets::INIT,
            accordions = self.accordions.len(),
            skipped = skipped.len(),
            "group constructed"
        );

        match failure {
            Some(error) => Err(error),
            None => Ok(skipped),
        }
    }

    fn manages(&self, root: NodeId) -> bool {
        self.malformed.contains(&root) || self.accordions.iter().any(|a| a.root() == root)
    }

    /// The group container.
    pub fn container(&self) -> NodeId {
        self.container
    }

    /// The accordions in document order.
    pub fn accordions(&self) -> &[Accordion] {
        &self.accordions
    }

    /// Mutable access to the accordions.
    pub fn accordions_mut(&mut self) -> &mut [Accordion] {
        &mut self.accordions
    }

    /// Trigger of every accordion, in document order.
    pub fn triggers(&self) -> Vec<NodeId> {
        self.accordions.iter().map(Accordion::trigger).collect()
    }

    /// Index of the accordion owning `trigger`.
    pub fn position_of(&self, trigger: NodeId) -> Option<usize> {
        self.accordions.iter().position(|a| a.trigger() == trigger)
    }

    /// Move focus between the group's triggers.
    ///
    /// Up/Down arrows and Ctrl+PageUp/PageDown step with wrap-around, Home and
    /// End jump to the first and last trigger. Handled keys prevent the default
    /// action. Returns true if the key was handled; keys aimed at anything but
    /// one of this group's triggers are ignored.
    pub fn handle_key(&self, doc: &mut Document, target: NodeId, event: &mut KeyEvent) -> bool {
        let Some(index) = self.position_of(target) else {
            return false;
        };
        let count = self.accordions.len();

        let step = match event.key {
            Key::ArrowUp => Some(-1),
            Key::ArrowDown => Some(1),
            Key::PageUp if event.modifiers.control => Some(-1),
            Key::PageDown if event.modifiers.control => Some(1),
            _ => None,
        };

        let next = match (step, event.key) {
            (Some(delta), _) => (index + count).wrapping_add_signed(delta) % count,
            (None, Key::Home) => 0,
            (None, Key::End) => count - 1,
            _ => return false,
        };

        tracing::trace!(target: targets::KEYBOARD, key = ?event.key, from = index, to = next, "moving focus");
        doc.focus(self.accordions[next].trigger());
        event.prevent_default();
        true
    }
}

#[cfg(test)]
mod tests {
    use wf_accordion_dom::{HtmlSanitizer, KeyboardModifiers};

    use super::*;
    use crate::options::AccordionOptions;

    const THREE: &str = r#"
        <div class="js-accordion-group">
            <div class="js-accordion"><div class="js-accordion__header"><div class="js-accordion__trigger">One</div></div><div class="js-accordion__panel">1</div></div>
            <div class="js-accordion"><div class="js-accordion__header"><div class="js-accordion__trigger">Two</div></div><div class="js-accordion__panel">2</div></div>
            <div class="js-accordion"><div class="js-accordion__header"><div class="js-accordion__trigger">Three</div></div><div class="js-accordion__panel">3</div></div>
        </div>"#;

    fn build(markup: &str) -> (Page, AccordionGroup, Vec<SkippedAccordion>) {
        let mut page = Page::from_html(markup, "https://example.org/").unwrap();
        let selectors = AccordionOptions::default().compile().unwrap();
        let container = page
            .document
            .query_selector(page.document.root(), &selectors.group)
            .unwrap();
        let mut group = AccordionGroup::new(container);
        let skipped = group
            .build(&mut page, &selectors, &SlugRegistry::new(), &HtmlSanitizer)
            .unwrap();
        (page, group, skipped)
    }

    fn press(page: &mut Page, group: &AccordionGroup, from: usize, key: Key, modifiers: KeyboardModifiers) -> Option<usize> {
        let triggers = group.triggers();
        page.document.focus(triggers[from]);
        let mut event = KeyEvent::new(key, modifiers);
        let handled = group.handle_key(&mut page.document, triggers[from], &mut event);
        assert_eq!(handled, event.is_default_prevented());
        let focused = page.document.focused()?;
        group.position_of(focused)
    }

    #[test]
    fn arrows_wrap_around() {
        let (mut page, group, _) = build(THREE);
        let none = KeyboardModifiers::NONE;

        assert_eq!(press(&mut page, &group, 0, Key::ArrowUp, none), Some(2));
        assert_eq!(press(&mut page, &group, 0, Key::ArrowDown, none), Some(1));
        assert_eq!(press(&mut page, &group, 2, Key::ArrowDown, none), Some(0));
    }

    #[test]
    fn ctrl_page_keys_step() {
        let (mut page, group, _) = build(THREE);
        let ctrl = KeyboardModifiers::CTRL;

        assert_eq!(press(&mut page, &group, 1, Key::PageUp, ctrl), Some(0));
        assert_eq!(press(&mut page, &group, 2, Key::PageDown, ctrl), Some(0));
    }

    #[test]
    fn page_keys_without_ctrl_are_ignored() {
        let (mut page, group, _) = build(THREE);
        assert_eq!(press(&mut page, &group, 1, Key::PageUp, KeyboardModifiers::NONE), Some(1));
    }

    #[test]
    fn home_and_end() {
        let (mut page, group, _) = build(THREE);
        let none = KeyboardModifiers::NONE;

        assert_eq!(press(&mut page, &group, 1, Key::Home, none), Some(0));
        assert_eq!(press(&mut page, &group, 1, Key::End, none), Some(2));
    }

    #[test]
    fn other_keys_do_nothing() {
        let (mut page, group, _) = build(THREE);
        assert_eq!(press(&mut page, &group, 1, Key::Character('j'), KeyboardModifiers::NONE), Some(1));
        assert_eq!(press(&mut page, &group, 1, Key::ArrowLeft, KeyboardModifiers::NONE), Some(1));
    }

    #[test]
    fn foreign_target_is_ignored() {
        let (mut page, group, _) = build(THREE);
        let mut event = KeyEvent::from(Key::ArrowDown);
        let root = page.document.root();

        assert!(!group.handle_key(&mut page.document, root, &mut event));
        assert!(!event.is_default_prevented());
    }

    #[test]
    fn nested_group_members_are_excluded() {
        let markup = r#"
        <div class="js-accordion-group">
            <div class="js-accordion">
                <div class="js-accordion__header"><div class="js-accordion__trigger">Outer</div></div>
                <div class="js-accordion__panel">
                    <div class="js-accordion-group">
                        <div class="js-accordion"><div class="js-accordion__header"><div class="js-accordion__trigger">Inner</div></div></div>
                    </div>
                </div>
            </div>
        </div>"#;
        let (page, group, _) = build(markup);

        assert_eq!(group.accordions().len(), 1);
        assert_eq!(group.accordions()[0].identifier(), "outer");
        assert_eq!(page.document.text_content(group.triggers()[0]), "Outer");
    }

    #[test]
    fn malformed_accordion_is_skipped() {
        let markup = r#"
        <div class="js-accordion-group">
            <div class="js-accordion"><div class="js-accordion__header">no trigger</div></div>
            <div class="js-accordion"><div class="js-accordion__header"><div class="js-accordion__trigger">Fine</div></div></div>
        </div>"#;
        let (_, group, skipped) = build(markup);

        assert_eq!(group.accordions().len(), 1);
        assert_eq!(skipped.len(), 1);
        assert!(skipped[0].error.is_structure());
    }

    #[test]
    fn failed_build_keeps_earlier_accordions_and_retries_the_rest() {
        let mut page = Page::from_html(THREE, "https://example.org/").unwrap();
        let selectors = AccordionOptions::default().compile().unwrap();
        let registry = SlugRegistry::new();
        let container = page
            .document
            .query_selector(page.document.root(), &selectors.group)
            .unwrap();

        let refuse_two = |html: &str| -> wf_accordion_dom::Result<String> {
            if html.contains("Two") {
                Err(wf_accordion_dom::DomError::sanitize("refused"))
            } else {
                HtmlSanitizer.sanitize(html)
            }
        };
        let mut group = AccordionGroup::new(container);
        assert!(group.build(&mut page, &selectors, &registry, &refuse_two).is_err());
        assert_eq!(group.accordions().len(), 1);
        assert_eq!(registry.slugs(), vec!["one"]);

        group.build(&mut page, &selectors, &registry, &HtmlSanitizer).unwrap();
        let ids: Vec<&str> = group.accordions().iter().map(|a| a.identifier()).collect();
        assert_eq!(ids, vec!["one", "two", "three"]);

        // Nothing left to build.
        assert!(group.build(&mut page, &selectors, &registry, &HtmlSanitizer).unwrap().is_empty());
        assert_eq!(group.accordions().len(), 3);
    }

    #[test]
    fn malformed_roots_are_not_retried() {
        let markup = r#"
        <div class="js-accordion-group">
            <div class="js-accordion"><div class="js-accordion__header">no trigger</div></div>
        </div>"#;
        let mut page = Page::from_html(markup, "https://example.org/").unwrap();
        let selectors = AccordionOptions::default().compile().unwrap();
        let registry = SlugRegistry::new();
        let container = page
            .document
            .query_selector(page.document.root(), &selectors.group)
            .unwrap();

        let mut group = AccordionGroup::new(container);
        assert_eq!(group.build(&mut page, &selectors, &registry, &HtmlSanitizer).unwrap().len(), 1);
        assert!(group.build(&mut page, &selectors, &registry, &HtmlSanitizer).unwrap().is_empty());
    }
}
