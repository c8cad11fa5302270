//! CSS selector types, parsing and matching.

mod matcher;
mod parser;
mod types;

pub use matcher::{ElementMatchContext, ElementTree, SelectorMatcher, SiblingInfo, matches_full};
pub use types::*;
