//! Selector matching algorithm.

use super::{Combinator, PseudoClass, Selector, SelectorList, SelectorPart, TypeSelector};
use crate::node::{ElementData, NodeId};

/// Element state for selector matching.
#[derive(Debug, Clone, Copy)]
pub struct ElementMatchContext<'a> {
    /// Tag name and attributes.
    pub element: &'a ElementData,
    /// Position among element siblings, for structural pseudo-classes.
    pub sibling_info: Option<SiblingInfo>,
    /// Number of child nodes (for :empty).
    pub child_count: usize,
}

/// Sibling position information.
#[derive(Debug, Clone, Copy)]
pub struct SiblingInfo {
    /// Zero-based index among element siblings.
    pub index: usize,
    /// Total number of element siblings (including self).
    pub count: usize,
}

impl SiblingInfo {
    /// Returns true if this is the first sibling.
    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    /// Returns true if this is the last sibling.
    pub fn is_last(&self) -> bool {
        self.index + 1 == self.count
    }

    /// Returns true if this is the only child.
    pub fn is_only(&self) -> bool {
        self.count == 1
    }
}

/// Tree navigation needed to match combinators.
pub trait ElementTree {
    /// Match context of an element, or `None` for non-element nodes.
    fn match_context(&self, node: NodeId) -> Option<ElementMatchContext<'_>>;

    /// Parent element, if the parent is an element.
    fn parent_element(&self, node: NodeId) -> Option<NodeId>;

    /// Closest preceding element sibling.
    fn previous_element_sibling(&self, node: NodeId) -> Option<NodeId>;
}

/// Selector matching engine.
pub struct SelectorMatcher;

impl SelectorMatcher {
    /// Check if a compound selector part matches the element.
    pub fn part_matches(part: &SelectorPart, context: &ElementMatchContext<'_>) -> bool {
        let element = context.element;

        // Check type selector
        if let Some(TypeSelector::Type(name)) = &part.type_selector
            && *name != element.tag_name
        {
            return false;
        }

        // Check ID selector
        if let Some(id) = &part.id
            && element.attributes.get("id") != Some(id.as_str())
        {
            return false;
        }

        // Check class selectors (all must match)
        if !part.classes.iter().all(|class| element.has_class(class)) {
            return false;
        }

        // Check attribute selectors (all must match)
        for attribute in &part.attributes {
            match element.attributes.get(&attribute.name) {
                Some(value) if attribute.matcher.matches(value) => {}
                _ => return false,
            }
        }

        // Check pseudo-class selectors (all must match)
        part.pseudo_classes
            .iter()
            .all(|pseudo| Self::pseudo_matches(pseudo, context))
    }

    fn pseudo_matches(pseudo: &PseudoClass, context: &ElementMatchContext<'_>) -> bool {
        match pseudo {
            PseudoClass::FirstChild => context.sibling_info.is_some_and(|s| s.is_first()),
            PseudoClass::LastChild => context.sibling_info.is_some_and(|s| s.is_last()),
            PseudoClass::OnlyChild => context.sibling_info.is_some_and(|s| s.is_only()),
            PseudoClass::Empty => context.child_count == 0,
            PseudoClass::Not(inner) => !Self::part_matches(inner, context),
        }
    }
}

/// Check if a full selector matches `node`, considering combinators.
///
/// This walks the selector from right to left. Descendant and general
/// sibling combinators backtrack, so `.a > .b .c` is matched exactly.
pub fn matches_full<T: ElementTree + ?Sized>(selector: &Selector, tree: &T, node: NodeId) -> bool {
    if selector.parts.is_empty() || selector.combinators.len() + 1 != selector.parts.len() {
        return false;
    }
    matches_from(selector, selector.parts.len() - 1, tree, node)
}

fn matches_from<T: ElementTree + ?Sized>(
    selector: &Selector,
    index: usize,
    tree: &T,
    node: NodeId,
) -> bool {
    let Some(context) = tree.match_context(node) else {
        return false;
    };
    if !SelectorMatcher::part_matches(&selector.parts[index], &context) {
        return false;
    }
    if index == 0 {
        return true;
    }

    let next = index - 1;
    match selector.combinators[next] {
        Combinator::Descendant => {
            let mut current = tree.parent_element(node);
            while let Some(ancestor) = current {
                if matches_from(selector, next, tree, ancestor) {
                    return true;
                }
                current = tree.parent_element(ancestor);
            }
            false
        }
        Combinator::Child => tree
            .parent_element(node)
            .is_some_and(|parent| matches_from(selector, next, tree, parent)),
        Combinator::AdjacentSibling => tree
            .previous_element_sibling(node)
            .is_some_and(|sibling| matches_from(selector, next, tree, sibling)),
        Combinator::GeneralSibling => {
            let mut current = tree.previous_element_sibling(node);
            while let Some(sibling) = current {
                if matches_from(selector, next, tree, sibling) {
                    return true;
                }
                current = tree.previous_element_sibling(sibling);
            }
            false
        }
    }
}

impl SelectorList {
    /// Returns true if `node` matches any selector in the list.
    pub fn matches<T: ElementTree + ?Sized>(&self, tree: &T, node: NodeId) -> bool {
        self.selectors
            .iter()
            .any(|selector| matches_full(selector, tree, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Attributes;
    use crate::selector::AttributeSelector;

    fn element(tag: &str, attrs: &[(&str, &str)]) -> ElementData {
        let mut data = ElementData::new(tag);
        data.attributes = attrs.iter().copied().collect::<Attributes>();
        data
    }

    fn make_context(element: &ElementData) -> ElementMatchContext<'_> {
        ElementMatchContext {
            element,
            sibling_info: None,
            child_count: 0,
        }
    }

    #[test]
    fn type_selector_matches() {
        let el = element("button", &[]);
        let context = make_context(&el);

        assert!(SelectorMatcher::part_matches(&SelectorPart::type_only("button"), &context));
        assert!(SelectorMatcher::part_matches(&SelectorPart::type_only("BUTTON"), &context));
        assert!(!SelectorMatcher::part_matches(&SelectorPart::type_only("h2"), &context));
        assert!(SelectorMatcher::part_matches(&SelectorPart::universal(), &context));
    }

    #[test]
    fn class_selector_matches() {
        let el = element("div", &[("class", "js-accordion js-accordion--open")]);
        let context = make_context(&el);

        let part = SelectorPart::class_only("js-accordion");
        assert!(SelectorMatcher::part_matches(&part, &context));

        let part = SelectorPart::new()
            .with_class("js-accordion")
            .with_class("js-accordion--open");
        assert!(SelectorMatcher::part_matches(&part, &context));

        let part = SelectorPart::new()
            .with_class("js-accordion")
            .with_class("js-accordion--closed");
        assert!(!SelectorMatcher::part_matches(&part, &context));
    }

    #[test]
    fn id_selector_matches() {
        let el = element("div", &[("id", "faq")]);
        let context = make_context(&el);

        assert!(SelectorMatcher::part_matches(&SelectorPart::id_only("faq"), &context));
        assert!(!SelectorMatcher::part_matches(&SelectorPart::id_only("FAQ"), &context));
    }

    #[test]
    fn attribute_selector_matches() {
        let el = element("div", &[("data-wf-accordion-expanded", "")]);
        let context = make_context(&el);

        let part = SelectorPart::new()
            .with_attribute(AttributeSelector::exists("data-wf-accordion-expanded"));
        assert!(SelectorMatcher::part_matches(&part, &context));

        let part = SelectorPart::new()
            .with_attribute(AttributeSelector::exists("data-wf-accordion-disabled"));
        assert!(!SelectorMatcher::part_matches(&part, &context));
    }

    #[test]
    fn structural_pseudo_class_matches() {
        let el = element("li", &[]);
        let mut context = make_context(&el);
        context.sibling_info = Some(SiblingInfo { index: 0, count: 3 });

        let first = SelectorPart::new().with_pseudo(PseudoClass::FirstChild);
        let last = SelectorPart::new().with_pseudo(PseudoClass::LastChild);
        assert!(SelectorMatcher::part_matches(&first, &context));
        assert!(!SelectorMatcher::part_matches(&last, &context));

        context.sibling_info = Some(SiblingInfo { index: 2, count: 3 });
        assert!(SelectorMatcher::part_matches(&last, &context));

        context.sibling_info = None;
        assert!(!SelectorMatcher::part_matches(&first, &context));
    }

    #[test]
    fn not_pseudo_class_matches() {
        let plain = element("button", &[]);
        let part = SelectorPart::new().with_pseudo(PseudoClass::Not(Box::new(
            SelectorPart::class_only("js-accordion__trigger"),
        )));
        assert!(SelectorMatcher::part_matches(&part, &make_context(&plain)));

        let trigger = element("button", &[("class", "js-accordion__trigger")]);
        assert!(!SelectorMatcher::part_matches(&part, &make_context(&trigger)));
    }
}
