//! Logging facilities for wf-accordion.
//!
//! wf-accordion uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in the host application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Build the page and run wfaccordions_init...
//! }
//! ```
//!
//! Every event is emitted under one of the [`targets`], so a directive such as
//! `RUST_LOG=wf_accordion::keyboard=trace` narrows output to a single subsystem.

/// Span names used throughout wf-accordion for tracing.
pub mod span_names {
    /// Initializer run (group discovery through the mounted signal).
    pub const INIT: &str = "wf_accordion::init";
    /// Construction of a single accordion group.
    pub const GROUP: &str = "wf_accordion::group";
    /// Signal emission span.
    pub const SIGNAL: &str = "wf_accordion_core::signal";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "wf_accordion_core";
    /// Identifier registry target.
    pub const REGISTRY: &str = "wf_accordion_core::registry";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "wf_accordion_core::signal";
    /// Host document model target.
    pub const DOM: &str = "wf_accordion_dom";
    /// Sanitizer target.
    pub const SANITIZE: &str = "wf_accordion_dom::sanitize";
    /// Placeholder enhancement target.
    pub const ENHANCE: &str = "wf_accordion::enhance";
    /// Accordion state machine target.
    pub const STATE: &str = "wf_accordion::state";
    /// URL fragment synchronization target.
    pub const FRAGMENT: &str = "wf_accordion::fragment";
    /// Group keyboard navigation target.
    pub const KEYBOARD: &str = "wf_accordion::keyboard";
    /// Initializer target.
    pub const INIT: &str = "wf_accordion::init";
}
