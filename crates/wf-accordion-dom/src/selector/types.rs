//! Selector type definitions.

use std::fmt;
use std::str::FromStr;

use crate::error::{DomError, Result};

/// A comma-separated group of selectors (e.g. `".js-accordion, [data-accordion]"`).
///
/// An element matches the list if it matches any of its selectors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectorList {
    /// The alternatives, in source order.
    pub selectors: Vec<Selector>,
}

impl SelectorList {
    /// Parse a selector list.
    pub fn parse(input: &str) -> Result<Self> {
        super::parser::parse_selector_list(input)
    }
}

impl FromStr for SelectorList {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Selector> for SelectorList {
    fn from(selector: Selector) -> Self {
        Self {
            selectors: vec![selector],
        }
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", selector)?;
        }
        Ok(())
    }
}

/// A complex selector (e.g. `".js-accordion > .js-accordion__header h2"`).
///
/// A selector consists of one or more compound parts connected by combinators.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    /// Chain of selector parts, left to right.
    pub parts: Vec<SelectorPart>,
    /// Combinators between parts (length = parts.len() - 1).
    pub combinators: Vec<Combinator>,
}

impl Selector {
    /// Create a simple type selector.
    pub fn type_selector(tag_name: impl Into<String>) -> Self {
        Self {
            parts: vec![SelectorPart::type_only(tag_name)],
            combinators: vec![],
        }
    }

    /// Create a class selector.
    pub fn class(class_name: impl Into<String>) -> Self {
        Self {
            parts: vec![SelectorPart::class_only(class_name)],
            combinators: vec![],
        }
    }

    /// Create an ID selector.
    pub fn id(id: impl Into<String>) -> Self {
        Self {
            parts: vec![SelectorPart::id_only(id)],
            combinators: vec![],
        }
    }

    /// Add a descendant selector part.
    pub fn descendant(mut self, part: SelectorPart) -> Self {
        if !self.parts.is_empty() {
            self.combinators.push(Combinator::Descendant);
        }
        self.parts.push(part);
        self
    }

    /// Add a child selector part.
    pub fn child(mut self, part: SelectorPart) -> Self {
        if !self.parts.is_empty() {
            self.combinators.push(Combinator::Child);
        }
        self.parts.push(part);
        self
    }

    /// Get the rightmost (subject) selector part.
    pub fn subject(&self) -> Option<&SelectorPart> {
        self.parts.last()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                match &self.combinators[i - 1] {
                    Combinator::Descendant => write!(f, " ")?,
                    Combinator::Child => write!(f, " > ")?,
                    Combinator::AdjacentSibling => write!(f, " + ")?,
                    Combinator::GeneralSibling => write!(f, " ~ ")?,
                }
            }
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}

/// A compound selector (e.g. `"button.js-accordion__trigger[type=button]"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SelectorPart {
    /// Type selector (tag name or universal).
    pub type_selector: Option<TypeSelector>,
    /// ID selector (#id).
    pub id: Option<String>,
    /// Class selectors (.class).
    pub classes: Vec<String>,
    /// Attribute selectors ([name], [name=value], ...).
    pub attributes: Vec<AttributeSelector>,
    /// Pseudo-class selectors (:first-child, :not(...), ...).
    pub pseudo_classes: Vec<PseudoClass>,
}

impl SelectorPart {
    /// Create a new empty selector part.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a type-only selector.
    pub fn type_only(tag_name: impl Into<String>) -> Self {
        Self {
            type_selector: Some(TypeSelector::Type(tag_name.into().to_ascii_lowercase())),
            ..Default::default()
        }
    }

    /// Create a universal selector part.
    pub fn universal() -> Self {
        Self {
            type_selector: Some(TypeSelector::Universal),
            ..Default::default()
        }
    }

    /// Create a class-only selector.
    pub fn class_only(class_name: impl Into<String>) -> Self {
        Self {
            classes: vec![class_name.into()],
            ..Default::default()
        }
    }

    /// Create an ID-only selector.
    pub fn id_only(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Add a class selector.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Add an attribute selector.
    pub fn with_attribute(mut self, attribute: AttributeSelector) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Add a pseudo-class selector.
    pub fn with_pseudo(mut self, pseudo: PseudoClass) -> Self {
        self.pseudo_classes.push(pseudo);
        self
    }

    /// Returns true if the part has no constraints at all.
    pub fn is_empty(&self) -> bool {
        self.type_selector.is_none()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attributes.is_empty()
            && self.pseudo_classes.is_empty()
    }
}

impl fmt::Display for SelectorPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.type_selector {
            Some(TypeSelector::Universal) => write!(f, "*")?,
            Some(TypeSelector::Type(t)) => write!(f, "{}", t)?,
            None => {}
        }

        if let Some(id) = &self.id {
            write!(f, "#{}", id)?;
        }

        for class in &self.classes {
            write!(f, ".{}", class)?;
        }

        for attribute in &self.attributes {
            write!(f, "{}", attribute)?;
        }

        for pseudo in &self.pseudo_classes {
            write!(f, ":{}", pseudo)?;
        }

        Ok(())
    }
}

/// Type selector - matches the tag name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSelector {
    /// Universal selector (*) - matches any element.
    Universal,
    /// Lower-cased tag name (e.g. "h2", "button").
    Type(String),
}

/// Combinator between selector parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Descendant combinator (space): matches any descendant.
    Descendant,
    /// Child combinator (>): matches direct child only.
    Child,
    /// Adjacent sibling (+): matches immediately following sibling.
    AdjacentSibling,
    /// General sibling (~): matches any following sibling.
    GeneralSibling,
}

/// An attribute selector such as `[data-wf-accordion-expanded]` or `[type="button"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeSelector {
    /// Lower-cased attribute name.
    pub name: String,
    /// How the value is compared.
    pub matcher: AttributeMatcher,
}

impl AttributeSelector {
    /// Match on presence only.
    pub fn exists(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            matcher: AttributeMatcher::Exists,
        }
    }

    /// Match on an exact value.
    pub fn equals(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            matcher: AttributeMatcher::Equals(value.into()),
        }
    }
}

impl fmt::Display for AttributeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (operator, value) = match &self.matcher {
            AttributeMatcher::Exists => return write!(f, "[{}]", self.name),
            AttributeMatcher::Equals(v) => ("=", v),
            AttributeMatcher::Includes(v) => ("~=", v),
            AttributeMatcher::DashMatch(v) => ("|=", v),
            AttributeMatcher::Prefix(v) => ("^=", v),
            AttributeMatcher::Suffix(v) => ("$=", v),
            AttributeMatcher::Substring(v) => ("*=", v),
        };
        write!(f, "[{}{}\"{}\"]", self.name, operator, value)
    }
}

/// Value comparison of an [`AttributeSelector`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeMatcher {
    /// `[name]`
    Exists,
    /// `[name=value]`
    Equals(String),
    /// `[name~=value]` - whitespace-separated list contains the value.
    Includes(String),
    /// `[name|=value]` - equals the value or starts with `value-`.
    DashMatch(String),
    /// `[name^=value]`
    Prefix(String),
    /// `[name$=value]`
    Suffix(String),
    /// `[name*=value]`
    Substring(String),
}

impl AttributeMatcher {
    /// Compare an attribute value.
    pub fn matches(&self, actual: &str) -> bool {
        match self {
            Self::Exists => true,
            Self::Equals(v) => actual == v,
            Self::Includes(v) => !v.is_empty() && actual.split_ascii_whitespace().any(|w| w == v),
            Self::DashMatch(v) => {
                actual == v || actual.strip_prefix(v.as_str()).is_some_and(|r| r.starts_with('-'))
            }
            Self::Prefix(v) => !v.is_empty() && actual.starts_with(v.as_str()),
            Self::Suffix(v) => !v.is_empty() && actual.ends_with(v.as_str()),
            Self::Substring(v) => !v.is_empty() && actual.contains(v.as_str()),
        }
    }
}

/// Structural pseudo-classes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PseudoClass {
    /// :first-child - first among siblings.
    FirstChild,
    /// :last-child - last among siblings.
    LastChild,
    /// :only-child - only child of parent.
    OnlyChild,
    /// :empty - has no children.
    Empty,
    /// :not(selector) - negation of a compound selector.
    Not(Box<SelectorPart>),
}

impl fmt::Display for PseudoClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PseudoClass::FirstChild => write!(f, "first-child"),
            PseudoClass::LastChild => write!(f, "last-child"),
            PseudoClass::OnlyChild => write!(f, "only-child"),
            PseudoClass::Empty => write!(f, "empty"),
            PseudoClass::Not(inner) => write!(f, "not({})", inner),
        }
    }
}

impl PseudoClass {
    /// Parse an argument-less pseudo-class name.
    pub fn from_css(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "first-child" => Some(Self::FirstChild),
            "last-child" => Some(Self::LastChild),
            "only-child" => Some(Self::OnlyChild),
            "empty" => Some(Self::Empty),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_display() {
        let sel = Selector::class("js-accordion")
            .descendant(SelectorPart::type_only("h2").with_pseudo(PseudoClass::FirstChild));
        assert_eq!(sel.to_string(), ".js-accordion h2:first-child");

        let sel = Selector::id("faq").child(SelectorPart::class_only("js-accordion__header"));
        assert_eq!(sel.to_string(), "#faq > .js-accordion__header");
    }

    #[test]
    fn selector_part_display() {
        let part = SelectorPart::type_only("BUTTON")
            .with_class("js-accordion__trigger")
            .with_attribute(AttributeSelector::equals("type", "button"))
            .with_pseudo(PseudoClass::Not(Box::new(SelectorPart::class_only("x"))));
        assert_eq!(
            part.to_string(),
            r#"button.js-accordion__trigger[type="button"]:not(.x)"#
        );
    }

    #[test]
    fn attribute_matchers() {
        assert!(AttributeMatcher::Exists.matches(""));
        assert!(AttributeMatcher::Equals("a".into()).matches("a"));
        assert!(!AttributeMatcher::Equals("a".into()).matches("ab"));
        assert!(AttributeMatcher::Includes("b".into()).matches("a b c"));
        assert!(!AttributeMatcher::Includes("b".into()).matches("abc"));
        assert!(AttributeMatcher::DashMatch("en".into()).matches("en-US"));
        assert!(!AttributeMatcher::DashMatch("en".into()).matches("english"));
        assert!(AttributeMatcher::Prefix("js-".into()).matches("js-accordion"));
        assert!(AttributeMatcher::Suffix("-panel".into()).matches("faq-panel"));
        assert!(AttributeMatcher::Substring("cord".into()).matches("accordion"));
        assert!(!AttributeMatcher::Substring(String::new()).matches("accordion"));
    }

    #[test]
    fn pseudo_from_css() {
        assert_eq!(PseudoClass::from_css("First-Child"), Some(PseudoClass::FirstChild));
        assert_eq!(PseudoClass::from_css("hover"), None);
    }
}
