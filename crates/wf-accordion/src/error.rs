//! Error types for accordion construction.

use std::fmt;

use wf_accordion_dom::DomError;

/// Result type alias for accordion operations.
pub type Result<T> = std::result::Result<T, AccordionError>;

/// The structural part that could not be located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccordionPart {
    /// The header inside the accordion root.
    Header,
    /// The trigger placeholder inside the header.
    Trigger,
}

impl fmt::Display for AccordionPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccordionPart::Header => write!(f, "header"),
            AccordionPart::Trigger => write!(f, "trigger"),
        }
    }
}

/// Errors that can occur while enhancing accordions.
#[derive(Debug, thiserror::Error)]
pub enum AccordionError {
    /// The accordion markup is malformed.
    #[error("Malformed accordion: no {part} matching '{selector}'")]
    Structure {
        part: AccordionPart,
        selector: String,
    },

    /// A selector option could not be parsed.
    #[error("Invalid option '{option}': {source}")]
    Configuration {
        option: &'static str,
        #[source]
        source: DomError,
    },

    /// Options JSON could not be deserialized.
    #[error("Invalid options: {0}")]
    Options(#[from] serde_json::Error),

    /// Document operation failed.
    #[error(transparent)]
    Dom(#[from] DomError),
}

impl AccordionError {
    /// Create a structure error.
    pub fn structure(part: AccordionPart, selector: impl Into<String>) -> Self {
        Self::Structure {
            part,
            selector: selector.into(),
        }
    }

    /// Create a configuration error.
    pub fn configuration(option: &'static str, source: DomError) -> Self {
        Self::Configuration { option, source }
    }

    /// Returns true for malformed markup, which skips the accordion instead of
    /// failing the whole initialization.
    pub fn is_structure(&self) -> bool {
        matches!(self, Self::Structure { .. })
    }
}
