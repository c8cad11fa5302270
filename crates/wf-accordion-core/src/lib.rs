//! Core systems for wf-accordion.
//!
//! This crate provides the DOM-independent building blocks of the accordion widget:
//!
//! - **Slugs**: Turning arbitrary trigger text into fragment-safe identifiers
//! - **Registry**: Collision-free identifier assignment for triggers and panels
//! - **Signal/Slot System**: Notifications for init completion and state changes
//! - **Logging**: `tracing` targets for filtering by subsystem
//!
//! # Slug Example
//!
//! ```
//! use wf_accordion_core::{slugify, SlugRegistry};
//!
//! assert_eq!(slugify("Hallo Welt"), "hallo-welt");
//!
//! let registry = SlugRegistry::new();
//! let first = registry.resolve(&slugify("Title"));
//! let second = registry.resolve(&slugify("Title"));
//!
//! assert_eq!(first.trigger, "title");
//! assert_eq!(second.trigger, "title-1");
//! assert_eq!(second.panel, "title-panel-1");
//! ```
//!
//! # Signal Example
//!
//! ```
//! use wf_accordion_core::Signal;
//!
//! let mounted = Signal::<usize>::new();
//! let conn_id = mounted.connect(|groups| {
//!     println!("{} accordion groups mounted", groups);
//! });
//!
//! mounted.emit(3);
//! mounted.disconnect(conn_id);
//! ```

pub mod logging;
mod registry;
pub mod signal;
mod slug;

pub use registry::{ResolvedIds, SlugRegistry};
pub use signal::{ConnectionId, Signal};
pub use slug::slugify;
