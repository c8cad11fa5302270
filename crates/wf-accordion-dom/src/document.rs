//! Arena-backed document tree.

use slotmap::SlotMap;

use crate::error::{DomError, Result};
use crate::html;
use crate::node::{Attributes, ElementData, Node, NodeData, NodeId};
use crate::selector::{ElementMatchContext, ElementTree, SelectorList, SiblingInfo};

/// A mutable HTML document.
///
/// Nodes live in an arena and are addressed by [`NodeId`]. The tree mirrors the
/// parts of the browser DOM the accordion widget touches: elements with ordered
/// attributes, text and comments, `innerHTML`-style serialization, selector
/// queries and a single focused element.
///
/// # Example
///
/// ```
/// use wf_accordion_dom::{Document, SelectorList};
///
/// let mut doc = Document::parse(r#"<div class="box"><p>Hi <em>there</em></p></div>"#)?;
/// let selector: SelectorList = ".box p".parse()?;
///
/// let p = doc.query_selector(doc.root(), &selector).expect("paragraph");
/// assert_eq!(doc.text_content(p), "Hi there");
///
/// doc.set_attribute(p, "id", "greeting")?;
/// assert_eq!(doc.outer_html(p), r#"<p id="greeting">Hi <em>there</em></p>"#);
/// # Ok::<(), wf_accordion_dom::DomError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
    focused: Option<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new(NodeData::Root));
        Self {
            nodes,
            root,
            focused: None,
        }
    }

    /// Parse markup into a new document. Top-level nodes become children of
    /// [`root`](Self::root).
    pub fn parse(markup: &str) -> Result<Self> {
        let mut doc = Self::new();
        let nodes = doc.parse_fragment(markup)?;
        let root = doc.root;
        for node in nodes {
            doc.append_child(root, node);
        }
        Ok(doc)
    }

    /// The document root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns true if the handle refers to a live node.
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    // =========================================================================
    // Node creation
    // =========================================================================

    /// Create a detached element.
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.nodes
            .insert(Node::new(NodeData::Element(ElementData::new(tag_name))))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.nodes.insert(Node::new(NodeData::Text(text.into())))
    }

    /// Create a detached comment.
    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.nodes.insert(Node::new(NodeData::Comment(text.into())))
    }

    pub(crate) fn create_root(&mut self) -> NodeId {
        self.nodes.insert(Node::new(NodeData::Root))
    }

    /// Parse markup into detached nodes.
    ///
    /// Nothing is attached to the tree, so a parse failure leaves the document
    /// unchanged.
    pub fn parse_fragment(&mut self, markup: &str) -> Result<Vec<NodeId>> {
        let holder = self.create_root();
        match html::parse_into(self, holder, markup) {
            Ok(()) => {
                let children = self.take_children(holder);
                self.nodes.remove(holder);
                Ok(children)
            }
            Err(err) => {
                self.remove(holder);
                Err(err)
            }
        }
    }

    // =========================================================================
    // Tree access
    // =========================================================================

    /// Node payload.
    pub fn data(&self, node: NodeId) -> Option<&NodeData> {
        self.nodes.get(node).map(|n| &n.data)
    }

    /// Element payload, if `node` is an element.
    pub fn element(&self, node: NodeId) -> Option<&ElementData> {
        match self.data(node) {
            Some(NodeData::Element(el)) => Some(el),
            _ => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Result<&mut ElementData> {
        match self.nodes.get_mut(node).map(|n| &mut n.data) {
            Some(NodeData::Element(el)) => Ok(el),
            _ => Err(DomError::NotAnElement),
        }
    }

    /// Returns true if `node` is an element.
    pub fn is_element(&self, node: NodeId) -> bool {
        self.element(node).is_some()
    }

    /// Lower-cased tag name of an element.
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|el| el.tag_name.as_str())
    }

    /// Parent node.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.parent)
    }

    /// Child nodes in order.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Element children in order.
    pub fn element_children(&self, node: NodeId) -> Vec<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .filter(|&child| self.is_element(child))
            .collect()
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(node), move |&current| self.parent(current))
    }

    /// Descendants in document (pre-)order, excluding `node` itself.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// Returns true if `node` is a strict descendant of `ancestor`.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|a| a == ancestor)
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Remove `node` from its parent. The node stays alive and can be reinserted.
    pub fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.parent(node) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.retain(|&child| child != node);
        }
        if let Some(n) = self.nodes.get_mut(node) {
            n.parent = None;
        }
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    /// Insert `child` as the first child of `parent`, detaching it first.
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.insert(0, child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    /// Insert `child` before `reference` under the reference's parent.
    ///
    /// Does nothing if `reference` is detached.
    pub fn insert_before(&mut self, reference: NodeId, child: NodeId) {
        if reference == child {
            return;
        }
        self.detach(child);
        let Some(parent) = self.parent(reference) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(parent) {
            let index = p
                .children
                .iter()
                .position(|&c| c == reference)
                .unwrap_or(p.children.len());
            p.children.insert(index, child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    /// Detach all children of `node` and return them in order.
    pub fn take_children(&mut self, node: NodeId) -> Vec<NodeId> {
        let children = match self.nodes.get_mut(node) {
            Some(n) => std::mem::take(&mut n.children),
            None => return Vec::new(),
        };
        for &child in &children {
            if let Some(c) = self.nodes.get_mut(child) {
                c.parent = None;
            }
        }
        children
    }

    /// Replace every child of `node` with `children`.
    ///
    /// The previous children are removed from the document.
    pub fn replace_children(&mut self, node: NodeId, children: Vec<NodeId>) {
        for old in self.take_children(node) {
            self.remove(old);
        }
        for child in children {
            self.append_child(node, child);
        }
    }

    /// Detach `node` and drop it together with its subtree.
    pub fn remove(&mut self, node: NodeId) {
        self.detach(node);
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if let Some(removed) = self.nodes.remove(current) {
                stack.extend(removed.children);
            }
            if self.focused == Some(current) {
                self.focused = None;
            }
        }
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    /// Attributes of an element.
    pub fn attributes(&self, node: NodeId) -> Option<&Attributes> {
        self.element(node).map(|el| &el.attributes)
    }

    /// Mutable attributes of an element.
    pub fn attributes_mut(&mut self, node: NodeId) -> Result<&mut Attributes> {
        self.element_mut(node).map(|el| &mut el.attributes)
    }

    /// Get an attribute value.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.attributes(node).and_then(|attrs| attrs.get(name))
    }

    /// Returns true if the element carries the attribute.
    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attributes(node).is_some_and(|attrs| attrs.contains(name))
    }

    /// Set an attribute.
    pub fn set_attribute(
        &mut self,
        node: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> Result<()> {
        self.attributes_mut(node)?.set(name, value);
        Ok(())
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> Option<String> {
        self.attributes_mut(node).ok()?.remove(name)
    }

    // =========================================================================
    // Content
    // =========================================================================

    /// Concatenated text of the node and its descendants.
    pub fn text_content(&self, node: NodeId) -> String {
        if let Some(NodeData::Text(text)) = self.data(node) {
            return text.clone();
        }
        self.descendants(node)
            .into_iter()
            .filter_map(|n| match self.data(n) {
                Some(NodeData::Text(text)) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Serialized markup of the node's children.
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(node) {
            html::write_node(self, child, &mut out);
        }
        out
    }

    /// Serialized markup of the node itself.
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        html::write_node(self, node, &mut out);
        out
    }

    /// Replace the node's children with parsed markup.
    ///
    /// The markup is parsed before anything is removed, so a parse failure
    /// leaves the existing children in place.
    pub fn set_inner_html(&mut self, node: NodeId, markup: &str) -> Result<()> {
        let children = self.parse_fragment(markup)?;
        self.replace_children(node, children);
        Ok(())
    }

    // =========================================================================
    // Selectors
    // =========================================================================

    /// Returns true if the element matches the selector list.
    pub fn matches(&self, node: NodeId, selector: &SelectorList) -> bool {
        selector.matches(self, node)
    }

    /// First descendant element of `scope` matching `selector`.
    pub fn query_selector(&self, scope: NodeId, selector: &SelectorList) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|&node| self.is_element(node) && selector.matches(self, node))
    }

    /// All descendant elements of `scope` matching `selector`, in document order.
    pub fn query_selector_all(&self, scope: NodeId, selector: &SelectorList) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&node| self.is_element(node) && selector.matches(self, node))
            .collect()
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Move focus to an element.
    pub fn focus(&mut self, node: NodeId) {
        if self.is_element(node) {
            self.focused = Some(node);
        }
    }

    /// The focused element.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Clear focus.
    pub fn blur(&mut self) {
        self.focused = None;
    }
}

impl ElementTree for Document {
    fn match_context(&self, node: NodeId) -> Option<ElementMatchContext<'_>> {
        let element = self.element(node)?;
        let sibling_info = self.parent(node).and_then(|parent| {
            let siblings = self.element_children(parent);
            let index = siblings.iter().position(|&s| s == node)?;
            Some(SiblingInfo {
                index,
                count: siblings.len(),
            })
        });
        Some(ElementMatchContext {
            element,
            sibling_info,
            child_count: self.children(node).len(),
        })
    }

    fn parent_element(&self, node: NodeId) -> Option<NodeId> {
        self.parent(node).filter(|&parent| self.is_element(parent))
    }

    fn previous_element_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let siblings = self.children(parent);
        let index = siblings.iter().position(|&s| s == node)?;
        siblings[..index]
            .iter()
            .rev()
            .copied()
            .find(|&s| self.is_element(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector(s: &str) -> SelectorList {
        s.parse().expect("valid selector")
    }

    #[test]
    fn build_and_serialize() {
        let mut doc = Document::new();
        let div = doc.create_element("DIV");
        let text = doc.create_text("a < b & c");
        doc.append_child(doc.root(), div);
        doc.append_child(div, text);
        doc.set_attribute(div, "title", "\"quoted\" & more").unwrap();

        assert_eq!(
            doc.outer_html(div),
            r#"<div title="&quot;quoted&quot; &amp; more">a &lt; b &amp; c</div>"#
        );
    }

    #[test]
    fn prepend_and_insert_before() {
        let mut doc = Document::parse("<ul><li>b</li></ul>").unwrap();
        let ul = doc.query_selector(doc.root(), &selector("ul")).unwrap();
        let b = doc.children(ul)[0];

        let a = doc.create_element("li");
        doc.prepend_child(ul, a);
        let between = doc.create_element("li");
        doc.insert_before(b, between);

        assert_eq!(doc.children(ul), &[a, between, b]);
        assert_eq!(doc.parent(between), Some(ul));
    }

    #[test]
    fn append_moves_existing_node() {
        let mut doc = Document::parse("<div id=a><span>x</span></div><div id=b></div>").unwrap();
        let span = doc.query_selector(doc.root(), &selector("span")).unwrap();
        let b = doc.query_selector(doc.root(), &selector("#b")).unwrap();

        doc.append_child(b, span);

        assert_eq!(doc.inner_html(doc.root()), r#"<div id="a"></div><div id="b"><span>x</span></div>"#);
    }

    #[test]
    fn remove_drops_subtree_and_focus() {
        let mut doc = Document::parse("<div><button>x</button></div>").unwrap();
        let div = doc.query_selector(doc.root(), &selector("div")).unwrap();
        let button = doc.query_selector(div, &selector("button")).unwrap();
        doc.focus(button);

        doc.remove(div);

        assert!(!doc.contains_node(div));
        assert!(!doc.contains_node(button));
        assert_eq!(doc.focused(), None);
        assert!(doc.children(doc.root()).is_empty());
    }

    #[test]
    fn text_content_concatenates_descendants() {
        let doc = Document::parse("<p>\n  Titel <strong>bold</strong>\n</p>").unwrap();
        let p = doc.query_selector(doc.root(), &selector("p")).unwrap();
        assert_eq!(doc.text_content(p), "\n  Titel bold\n");
    }

    #[test]
    fn set_inner_html_keeps_children_on_error() {
        let mut doc = Document::parse("<div><em>keep</em></div>").unwrap();
        let div = doc.query_selector(doc.root(), &selector("div")).unwrap();

        assert!(doc.set_inner_html(div, "<a href=\"x>broken").is_err());
        assert_eq!(doc.inner_html(div), "<em>keep</em>");

        doc.set_inner_html(div, "new <b>content</b>").unwrap();
        assert_eq!(doc.inner_html(div), "new <b>content</b>");
    }

    #[test]
    fn query_is_scoped_but_matches_globally() {
        let doc = Document::parse(
            r#"<section class="outer"><div class="inner"><p>one</p></div></section><p>two</p>"#,
        )
        .unwrap();
        let inner = doc.query_selector(doc.root(), &selector(".inner")).unwrap();

        // `.outer p` is satisfied through an ancestor outside the scope.
        let found = doc.query_selector_all(inner, &selector(".outer p"));
        assert_eq!(found.len(), 1);
        assert_eq!(doc.text_content(found[0]), "one");

        assert_eq!(doc.query_selector_all(doc.root(), &selector("p")).len(), 2);
    }

    #[test]
    fn contains_and_ancestors() {
        let doc = Document::parse("<a><b><c></c></b></a>").unwrap();
        let a = doc.query_selector(doc.root(), &selector("a")).unwrap();
        let c = doc.query_selector(doc.root(), &selector("c")).unwrap();

        assert!(doc.contains(a, c));
        assert!(!doc.contains(c, a));
        assert!(!doc.contains(a, a));
        assert_eq!(doc.ancestors(c).count(), 3);
    }

    #[test]
    fn focus_only_accepts_elements() {
        let mut doc = Document::parse("<button>x</button>").unwrap();
        let button = doc.children(doc.root())[0];
        let text = doc.children(button)[0];

        doc.focus(text);
        assert_eq!(doc.focused(), None);
        doc.focus(button);
        assert_eq!(doc.focused(), Some(button));
        doc.blur();
        assert_eq!(doc.focused(), None);
    }

    #[test]
    fn attribute_on_text_node_fails() {
        let mut doc = Document::new();
        let text = doc.create_text("x");
        assert!(matches!(
            doc.set_attribute(text, "id", "x"),
            Err(DomError::NotAnElement)
        ));
    }
}
