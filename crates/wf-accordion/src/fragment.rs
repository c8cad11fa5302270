//! URL fragment synchronization.
//!
//! Expanding accordions one after another must not fill the session history,
//! otherwise the back button walks through every toggle before leaving the
//! page. Writes therefore replace the current history entry when the address
//! bar supports it and only fall back to a plain fragment assignment when it
//! does not.

use wf_accordion_core::logging::targets;
use wf_accordion_dom::AddressBar;

/// Current fragment without `#`, empty if there is none.
pub fn read_fragment<L: AddressBar + ?Sized>(location: &L) -> String {
    location.fragment().unwrap_or_default()
}

/// Point the fragment at `id`.
pub fn write_fragment<L: AddressBar + ?Sized>(location: &mut L, id: &str) {
    if location.supports_replace_state() {
        location.replace_fragment(Some(id));
    } else {
        tracing::trace!(
            target: targets::FRAGMENT,
            id,
            "replace-state unavailable, assigning fragment"
        );
        location.assign_fragment(id);
    }
}

/// Remove the fragment.
pub fn clear_fragment<L: AddressBar + ?Sized>(location: &mut L) {
    if location.supports_replace_state() {
        location.replace_fragment(None);
    } else {
        tracing::trace!(
            target: targets::FRAGMENT,
            "replace-state unavailable, assigning empty fragment"
        );
        location.assign_fragment("");
    }
}
