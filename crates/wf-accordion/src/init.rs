//! Discovery, initialization and runtime dispatch.

use wf_accordion_core::logging::targets;
use wf_accordion_core::{Signal, SlugRegistry};
use wf_accordion_dom::{AddressBar, HtmlSanitizer, KeyEvent, NodeId, Page, Sanitizer};

use crate::accordion::Accordion;
use crate::error::{AccordionError, Result};
use crate::group::AccordionGroup;
use crate::options::AccordionOptions;

/// Payload of [`Accordions::mounted`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountedEvent {
    /// Number of groups managed so far.
    pub group_count: usize,
    /// Trigger identifiers of every managed accordion, in construction order.
    pub accordions: Vec<String>,
    /// Every identifier handed out by the registry.
    pub slugs: Vec<String>,
}

/// Payload of [`Accordions::toggled`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleEvent {
    /// Trigger identifier of the accordion.
    pub identifier: String,
    /// The new state.
    pub expanded: bool,
}

/// Every accordion group on a page, plus the identifier registry they share.
///
/// One instance lives as long as the page. Repeated [`init`](Self::init)
/// calls add accordions that are not managed yet.
pub struct Accordions {
    registry: SlugRegistry,
    groups: Vec<AccordionGroup>,
    failures: Vec<AccordionError>,
    sanitizer: Box<dyn Sanitizer>,
    /// Emitted once at the end of every init call.
    pub mounted: Signal<MountedEvent>,
    /// Emitted after a click changed an accordion's state.
    pub toggled: Signal<ToggleEvent>,
}

impl Default for Accordions {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Accordions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Accordions")
            .field("registry", &self.registry)
            .field("groups", &self.groups)
            .field("failures", &self.failures)
            .field("mounted", &self.mounted)
            .field("toggled", &self.toggled)
            .finish_non_exhaustive()
    }
}

impl Accordions {
    /// Create an empty registry using [`HtmlSanitizer`].
    pub fn new() -> Self {
        Self::with_sanitizer(HtmlSanitizer)
    }

    /// Create an empty registry with a custom sanitizer.
    pub fn with_sanitizer(sanitizer: impl Sanitizer + 'static) -> Self {
        Self {
            registry: SlugRegistry::new(),
            groups: Vec::new(),
            failures: Vec::new(),
            sanitizer: Box::new(sanitizer),
            mounted: Signal::new(),
            toggled: Signal::new(),
        }
    }

    /// Enhance every group in the document.
    pub fn init<L: AddressBar>(
        &mut self,
        page: &mut Page<L>,
        options: &AccordionOptions,
    ) -> Result<MountedEvent> {
        let root = page.document.root();
        self.init_in(page, root, options)
    }

    /// Enhance every group inside `scope`.
    ///
    /// Selectors are parsed before the document is touched, so an invalid
    /// option fails without side effects. Malformed accordions are skipped
    /// and recorded in [`failures`](Self::failures).
    ///
    /// Any other error ends the call, but accordions enhanced before it stay
    /// managed. Calling again retries only the roots that are not managed yet.
    #[tracing::instrument(skip_all, target = "wf_accordion::init", level = "debug", fields(?scope))]
    pub fn init_in<L: AddressBar>(
        &mut self,
        page: &mut Page<L>,
        scope: NodeId,
        options: &AccordionOptions,
    ) -> Result<MountedEvent> {
        let selectors = options.compile()?;
        let known: Vec<NodeId> = self.iter().map(Accordion::root).collect();

        let containers = page.document.query_selector_all(scope, &selectors.group);
        let mut outcome = Ok(());
        for container in containers {
            // An outer group's enhancement may have replaced this container.
            if !page.document.contains_node(container) {
                continue;
            }
            let index = match self.groups.iter().position(|g| g.container() == container) {
                Some(index) => index,
                None => {
                    self.groups.push(AccordionGroup::new(container));
                    self.groups.len() - 1
                }
            };
            match self.groups[index].build(page, &selectors, &self.registry, self.sanitizer.as_ref()) {
                Ok(skipped) => self.failures.extend(skipped.into_iter().map(|s| s.error)),
                Err(error) => {
                    outcome = Err(error);
                    break;
                }
            }
        }

        // Accordions built before a failure stay managed and reachable.
        self.reveal_deep_link_ancestors(page, &known)?;
        outcome?;

        let event = self.mounted_event();
        tracing::info!(
            target: targets::INIT,
            groups = event.group_count,
            accordions = event.accordions.len(),
            failures = self.failures.len(),
            "accordions mounted"
        );
        self.mounted.emit(event.clone());
        Ok(event)
    }

    /// Groups in discovery order.
    pub fn groups(&self) -> &[AccordionGroup] {
        &self.groups
    }

    /// Malformed accordions skipped so far.
    pub fn failures(&self) -> &[AccordionError] {
        &self.failures
    }

    /// The identifier registry.
    pub fn registry(&self) -> &SlugRegistry {
        &self.registry
    }

    /// Iterate over every managed accordion.
    pub fn iter(&self) -> impl Iterator<Item = &Accordion> {
        self.groups.iter().flat_map(|g| g.accordions().iter())
    }

    /// Look up an accordion by its trigger identifier.
    pub fn get(&self, identifier: &str) -> Option<&Accordion> {
        self.iter().find(|a| a.identifier() == identifier)
    }

    /// Handle a click on `target` or anything inside a trigger.
    ///
    /// Toggles the accordion whose trigger is the nearest to `target` and
    /// returns whether its state changed.
    pub fn click<L: AddressBar>(&mut self, page: &mut Page<L>, target: NodeId) -> Result<bool> {
        let trigger = std::iter::once(target)
            .chain(page.document.ancestors(target))
            .find(|&node| self.iter().any(|a| a.trigger() == node));
        let Some(trigger) = trigger else {
            return Ok(false);
        };
        let Some(accordion) = self.find_mut(|a| a.trigger() == trigger) else {
            return Ok(false);
        };

        if !accordion.toggle(page)? {
            return Ok(false);
        }
        let event = ToggleEvent {
            identifier: accordion.identifier().to_string(),
            expanded: accordion.is_expanded(),
        };
        self.toggled.emit(event);
        Ok(true)
    }

    /// Handle a keydown on `target`. Returns whether a group handled it.
    pub fn key_down<L: AddressBar>(
        &self,
        page: &mut Page<L>,
        target: NodeId,
        event: &mut KeyEvent,
    ) -> bool {
        self.groups
            .iter()
            .any(|group| group.handle_key(&mut page.document, target, event))
    }

    /// Expand the accordion named `identifier` and every ancestor accordion
    /// whose panel contains it, then focus its trigger.
    ///
    /// Returns false if no enabled accordion has that identifier. Ancestors
    /// that are disabled stay as they are.
    pub fn reveal<L: AddressBar>(&mut self, page: &mut Page<L>, identifier: &str) -> Result<bool> {
        let Some(accordion) = self.find_mut(|a| a.identifier() == identifier && !a.is_disabled())
        else {
            return Ok(false);
        };
        accordion.expand(&mut page.document)?;
        let (root, trigger) = (accordion.root(), accordion.trigger());

        self.expand_ancestors(page, root)?;
        page.document.focus(trigger);
        Ok(true)
    }

    fn find_mut(&mut self, mut predicate: impl FnMut(&Accordion) -> bool) -> Option<&mut Accordion> {
        self.groups
            .iter_mut()
            .flat_map(|g| g.accordions_mut().iter_mut())
            .find(|a| predicate(&**a))
    }

    fn expand_ancestors<L: AddressBar>(&mut self, page: &mut Page<L>, root: NodeId) -> Result<()> {
        let doc = &mut page.document;
        for group in &mut self.groups {
            for ancestor in group.accordions_mut() {
                let Some(panel) = ancestor.panel() else {
                    continue;
                };
                if doc.contains(panel, root) && ancestor.expand(doc)? {
                    tracing::debug!(
                        target: targets::STATE,
                        id = ancestor.identifier(),
                        "expanded ancestor of deep-link target"
                    );
                }
            }
        }
        Ok(())
    }

    fn reveal_deep_link_ancestors<L: AddressBar>(
        &mut self,
        page: &mut Page<L>,
        known: &[NodeId],
    ) -> Result<()> {
        let targets: Vec<NodeId> = self
            .iter()
            .filter(|a| a.is_deep_link_target() && !a.is_disabled())
            .filter(|a| !known.contains(&a.root()))
            .map(Accordion::root)
            .collect();
        for root in targets {
            self.expand_ancestors(page, root)?;
        }
        Ok(())
    }

    fn mounted_event(&self) -> MountedEvent {
        MountedEvent {
            group_count: self.groups.len(),
            accordions: self.iter().map(|a| a.identifier().to_string()).collect(),
            slugs: self.registry.slugs(),
        }
    }
}

/// Enhance every accordion group on the page.
///
/// Uses the default options when `options` is `None`. `on_mounted` runs once,
/// after [`Accordions::mounted`] has been emitted.
pub fn wfaccordions_init<L, F>(
    accordions: &mut Accordions,
    page: &mut Page<L>,
    options: Option<&AccordionOptions>,
    on_mounted: Option<F>,
) -> Result<MountedEvent>
where
    L: AddressBar,
    F: FnOnce(&MountedEvent),
{
    let event = match options {
        Some(options) => accordions.init(page, options)?,
        None => accordions.init(page, &AccordionOptions::default())?,
    };
    if let Some(callback) = on_mounted {
        callback(&event);
    }
    Ok(event)
}
