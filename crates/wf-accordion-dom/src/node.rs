//! Node and attribute types.

use slotmap::new_key_type;

new_key_type! {
    /// Handle to a node in a [`Document`](crate::Document).
    ///
    /// Handles stay valid until the node (or an ancestor) is removed with
    /// [`Document::remove`](crate::Document::remove).
    pub struct NodeId;
}

/// A single `name="value"` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lower-cased attribute name.
    pub name: String,
    /// Attribute value (empty for valueless attributes).
    pub value: String,
}

/// Attributes of an element in declaration order.
///
/// Names are unique. Setting an existing name keeps its position, new names
/// are appended, which matches how browsers serialize `outerHTML`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<Attribute>,
}

impl Attributes {
    /// Create an empty attribute list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an attribute value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Returns true if the attribute is present.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|attr| attr.name == name)
    }

    /// Set an attribute, keeping its position if it already exists.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into().to_ascii_lowercase();
        let value = value.into();
        match self.entries.iter_mut().find(|attr| attr.name == name) {
            Some(existing) => existing.value = value,
            None => self.entries.push(Attribute { name, value }),
        }
    }

    /// Remove an attribute, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|attr| attr.name == name)?;
        Some(self.entries.remove(index).value)
    }

    /// Remove every attribute.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Attribute names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|attr| attr.name.as_str())
    }

    /// Iterate over attributes in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.entries.iter()
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        for (name, value) in iter {
            attributes.set(name, value);
        }
        attributes
    }
}

/// Element payload: tag name plus attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Lower-cased tag name.
    pub tag_name: String,
    /// Attributes in declaration order.
    pub attributes: Attributes,
}

impl ElementData {
    /// Create an element without attributes.
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into().to_ascii_lowercase(),
            attributes: Attributes::new(),
        }
    }

    /// Returns true if the `class` attribute lists `class_name`.
    pub fn has_class(&self, class_name: &str) -> bool {
        self.attributes
            .get("class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class_name))
    }

    /// Returns true for `h2` through `h6`.
    pub fn is_heading(&self) -> bool {
        matches!(self.tag_name.as_str(), "h2" | "h3" | "h4" | "h5" | "h6")
    }
}

/// What a node holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// The document root (or the detached holder of a parsed fragment).
    Root,
    /// An element.
    Element(ElementData),
    /// A text node.
    Text(String),
    /// A comment.
    Comment(String),
}

/// Tree bookkeeping for one node.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) data: NodeData,
}

impl Node {
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_keep_declaration_order() {
        let mut attrs: Attributes = [("class", "js-accordion__trigger"), ("id", "x")]
            .into_iter()
            .collect();
        attrs.set("type", "button");
        attrs.set("class", "changed");

        let names: Vec<_> = attrs.names().collect();
        assert_eq!(names, vec!["class", "id", "type"]);
        assert_eq!(attrs.get("class"), Some("changed"));
    }

    #[test]
    fn attribute_names_are_lower_cased() {
        let mut attrs = Attributes::new();
        attrs.set("ARIA-Expanded", "true");
        assert_eq!(attrs.get("aria-expanded"), Some("true"));
        assert!(attrs.contains("aria-expanded"));
    }

    #[test]
    fn remove_and_clear() {
        let mut attrs: Attributes = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(attrs.remove("a"), Some("1".to_string()));
        assert_eq!(attrs.remove("a"), None);
        attrs.clear();
        assert!(attrs.is_empty());
    }

    #[test]
    fn heading_levels() {
        assert!(ElementData::new("H2").is_heading());
        assert!(ElementData::new("h6").is_heading());
        assert!(!ElementData::new("h1").is_heading());
        assert!(!ElementData::new("div").is_heading());
    }

    #[test]
    fn class_membership() {
        let mut el = ElementData::new("div");
        el.attributes.set("class", "js-accordion  js-accordion--cke");
        assert!(el.has_class("js-accordion"));
        assert!(el.has_class("js-accordion--cke"));
        assert!(!el.has_class("js"));
    }
}
