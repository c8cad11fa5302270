//! Collision-free identifier assignment.

use parking_lot::Mutex;

use crate::logging::targets;

/// Identifiers assigned to one accordion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIds {
    /// The identifier for the trigger (and the URL fragment).
    pub trigger: String,
    /// The identifier for the panel.
    pub panel: String,
    /// The numeric suffix, if the base identifier was already taken.
    pub occurrence: Option<usize>,
}

#[derive(Debug, Default)]
struct RegistryState {
    /// Trigger identifiers in assignment order.
    slugs: Vec<String>,
    /// Panel identifiers in assignment order.
    panels: Vec<String>,
}

impl RegistryState {
    fn is_taken(&self, id: &str) -> bool {
        self.slugs.iter().chain(self.panels.iter()).any(|taken| taken == id)
    }
}

/// Page-lifetime registry of every identifier handed out to a trigger or panel.
///
/// The registry only grows. Resolution counts the registered trigger
/// identifiers that contain the requested base as a substring; that count
/// becomes the suffix when the base itself is already in use:
///
/// ```
/// use wf_accordion_core::SlugRegistry;
///
/// let registry = SlugRegistry::new();
/// assert_eq!(registry.resolve("title").trigger, "title");
/// assert_eq!(registry.resolve("title").trigger, "title-1");
/// assert_eq!(registry.resolve("title").trigger, "title-2");
/// ```
///
/// Resolution is serialized through an internal mutex, so a registry can be
/// shared between threads without racing on the occurrence count.
#[derive(Debug, Default)]
pub struct SlugRegistry {
    state: Mutex<RegistryState>,
}

impl SlugRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a base identifier into unique trigger and panel identifiers and
    /// record both.
    ///
    /// A free base is used verbatim (`base`, `base-panel`). Otherwise the
    /// suffix starts at the occurrence count and is bumped until neither
    /// `base-N` nor `base-panel-N` is taken. An empty base never resolves
    /// verbatim.
    pub fn resolve(&self, base: &str) -> ResolvedIds {
        let mut state = self.state.lock();

        let panel_base = format!("{base}-panel");
        if !base.is_empty() && !state.is_taken(base) && !state.is_taken(&panel_base) {
            state.slugs.push(base.to_string());
            state.panels.push(panel_base.clone());
            tracing::trace!(target: targets::REGISTRY, id = base, "registered identifier");
            return ResolvedIds {
                trigger: base.to_string(),
                panel: panel_base,
                occurrence: None,
            };
        }

        let occurrences = state.slugs.iter().filter(|slug| slug.contains(base)).count();
        let mut suffix = occurrences.max(1);
        loop {
            let trigger = format!("{base}-{suffix}");
            let panel = format!("{panel_base}-{suffix}");
            if !state.is_taken(&trigger) && !state.is_taken(&panel) {
                state.slugs.push(trigger.clone());
                state.panels.push(panel.clone());
                tracing::trace!(
                    target: targets::REGISTRY,
                    base,
                    id = %trigger,
                    "registered suffixed identifier"
                );
                return ResolvedIds {
                    trigger,
                    panel,
                    occurrence: Some(suffix),
                };
            }
            suffix += 1;
        }
    }

    /// Check whether an identifier has been assigned to a trigger or panel.
    pub fn contains(&self, id: &str) -> bool {
        self.state.lock().is_taken(id)
    }

    /// Snapshot of the trigger identifiers, in assignment order.
    pub fn slugs(&self) -> Vec<String> {
        self.state.lock().slugs.clone()
    }

    /// Snapshot of the panel identifiers, in assignment order.
    pub fn panel_ids(&self) -> Vec<String> {
        self.state.lock().panels.clone()
    }

    /// Number of resolved accordions.
    pub fn len(&self) -> usize {
        self.state.lock().slugs.len()
    }

    /// Returns true if nothing has been resolved yet.
    pub fn is_empty(&self) -> bool {
        self.state.lock().slugs.is_empty()
    }
}

static_assertions::assert_impl_all!(SlugRegistry: Send, Sync);
