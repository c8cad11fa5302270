//! Error types for the host document model.

/// Result type alias for document operations.
pub type Result<T> = std::result::Result<T, DomError>;

/// Errors that can occur while parsing, querying or sanitizing documents.
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    /// HTML parsing error.
    #[error("HTML parse error at byte {position}: {message}")]
    Parse { message: String, position: u64 },

    /// Selector parsing error.
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    /// Address bar URL could not be parsed.
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The sanitizer rejected or failed to process markup.
    #[error("Sanitizer failed: {0}")]
    Sanitize(String),

    /// An element operation was applied to a text, comment or root node.
    #[error("Node is not an element")]
    NotAnElement,
}

impl DomError {
    /// Create a parse error.
    pub fn parse(message: impl Into<String>, position: u64) -> Self {
        Self::Parse {
            message: message.into(),
            position,
        }
    }

    /// Create a selector error.
    pub fn invalid_selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            message: message.into(),
        }
    }

    /// Create a URL error.
    pub fn invalid_url(url: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            source,
        }
    }

    /// Create a sanitizer error.
    pub fn sanitize(message: impl Into<String>) -> Self {
        Self::Sanitize(message.into())
    }
}
