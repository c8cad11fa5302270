//! Trigger enhancement.
//!
//! Author markup marks the trigger with a placeholder element that is not
//! necessarily interactive. Enhancement turns it into a `<button type="button">`
//! that carries the placeholder's attributes and its sanitized content. When a
//! heading is involved, the heading stays in place and the button becomes its
//! only child, so the document outline is unchanged.

use wf_accordion_core::logging::targets;
use wf_accordion_dom::{Document, NodeId, Sanitizer};

use crate::attributes::{apply_attributes, clear_attributes, read_attributes};
use crate::error::{AccordionError, AccordionPart, Result};
use crate::options::Selectors;

/// How a trigger placeholder is structured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderShape {
    /// The placeholder is an `h2`-`h6` heading.
    IsHeading,
    /// The placeholder's only child node is a heading.
    WrapsHeading {
        /// The wrapped heading.
        heading: NodeId,
    },
    /// The placeholder is already a `<button>`.
    AlreadyButton,
    /// Anything else.
    Plain,
}

impl PlaceholderShape {
    /// Classify a placeholder. Earlier variants take priority.
    pub fn inspect(doc: &Document, placeholder: NodeId) -> Self {
        let Some(element) = doc.element(placeholder) else {
            return Self::Plain;
        };
        if element.is_heading() {
            return Self::IsHeading;
        }

        if let [only] = doc.children(placeholder)
            && doc.element(*only).is_some_and(|child| child.is_heading())
        {
            return Self::WrapsHeading { heading: *only };
        }

        if element.tag_name == "button" {
            Self::AlreadyButton
        } else {
            Self::Plain
        }
    }
}

/// Replace the trigger placeholder in `root` with a button and return it.
///
/// The header and placeholder are located and the content is sanitized before
/// anything is mutated, so an error leaves the markup untouched.
pub fn enhance(
    doc: &mut Document,
    root: NodeId,
    selectors: &Selectors,
    sanitizer: &dyn Sanitizer,
) -> Result<NodeId> {
    let header = doc
        .query_selector(root, &selectors.header)
        .ok_or_else(|| AccordionError::structure(AccordionPart::Header, selectors.header.to_string()))?;
    let placeholder = doc
        .query_selector(header, &selectors.trigger)
        .ok_or_else(|| {
            AccordionError::structure(AccordionPart::Trigger, selectors.trigger.to_string())
        })?;

    let shape = PlaceholderShape::inspect(doc, placeholder);
    let content_source = match shape {
        PlaceholderShape::WrapsHeading { heading } => heading,
        _ => placeholder,
    };
    let markup = sanitizer.sanitize(&doc.inner_html(content_source))?;
    let content = doc.parse_fragment(&markup)?;

    tracing::debug!(target: targets::ENHANCE, ?shape, "enhancing trigger placeholder");

    let trigger = match shape {
        PlaceholderShape::IsHeading => {
            let attributes = read_attributes(doc, placeholder);
            let button = doc.create_element("button");
            apply_attributes(doc, button, &attributes)?;
            doc.set_attribute(button, "type", "button")?;
            doc.replace_children(button, content);

            clear_attributes(doc, placeholder)?;
            doc.replace_children(placeholder, vec![button]);
            doc.prepend_child(header, placeholder);
            button
        }
        PlaceholderShape::WrapsHeading { heading } => {
            let attributes = read_attributes(doc, placeholder);
            let button = doc.create_element("button");
            apply_attributes(doc, button, &attributes)?;
            doc.set_attribute(button, "type", "button")?;
            doc.replace_children(button, content);

            doc.replace_children(heading, vec![button]);
            doc.prepend_child(header, heading);
            doc.remove(placeholder);
            button
        }
        PlaceholderShape::AlreadyButton => {
            doc.set_attribute(placeholder, "type", "button")?;
            doc.replace_children(placeholder, content);
            doc.prepend_child(header, placeholder);
            placeholder
        }
        PlaceholderShape::Plain => {
            let attributes = read_attributes(doc, placeholder);
            let button = doc.create_element("button");
            apply_attributes(doc, button, &attributes)?;
            doc.set_attribute(button, "type", "button")?;
            doc.replace_children(button, content);

            doc.remove(placeholder);
            doc.prepend_child(header, button);
            button
        }
    };

    Ok(trigger)
}

#[cfg(test)]
mod tests {
    use wf_accordion_dom::{DomError, HtmlSanitizer, SelectorList};

    use super::*;
    use crate::options::AccordionOptions;

    fn accordion(placeholder: &str) -> String {
        format!(
            r#"
        <div class="js-accordion js-accordion--cke">
            <div class="js-accordion__header">
                {placeholder}
            </div>
            <div class="js-accordion__panel">Text</div>
        </div>
      "#
        )
    }

    fn setup(markup: &str) -> (Document, NodeId, Selectors) {
        let doc = Document::parse(markup).unwrap();
        let selectors = AccordionOptions::default().compile().unwrap();
        let root = doc.query_selector(doc.root(), &selectors.root).unwrap();
        (doc, root, selectors)
    }

    fn header_html(doc: &Document) -> String {
        let header: SelectorList = ".js-accordion__header".parse().unwrap();
        let header = doc.query_selector(doc.root(), &header).unwrap();
        doc.inner_html(header).trim().to_string()
    }

    fn enhanced_header(placeholder: &str) -> String {
        let (mut doc, root, selectors) = setup(&accordion(placeholder));
        enhance(&mut doc, root, &selectors, &HtmlSanitizer).unwrap();
        header_html(&doc)
    }

    #[test]
    fn basic_placeholder() {
        assert_eq!(
            enhanced_header(r#"<div class="js-accordion__trigger">Titel</div>"#),
            r#"<button class="js-accordion__trigger" type="button">Titel</button>"#
        );
    }

    #[test]
    fn existing_button() {
        assert_eq!(
            enhanced_header(r#"<button class="js-accordion__trigger">Titel</button>"#),
            r#"<button class="js-accordion__trigger" type="button">Titel</button>"#
        );
    }

    #[test]
    fn existing_button_is_reused() {
        let (mut doc, root, selectors) =
            setup(&accordion(r#"<button class="js-accordion__trigger">Titel</button>"#));
        let before = doc.query_selector(root, &selectors.trigger).unwrap();
        let trigger = enhance(&mut doc, root, &selectors, &HtmlSanitizer).unwrap();
        assert_eq!(before, trigger);
    }

    #[test]
    fn formatted_placeholder() {
        assert_eq!(
            enhanced_header(r#"<div class="js-accordion__trigger">Titel <strong>bold</strong></div>"#),
            r#"<button class="js-accordion__trigger" type="button">Titel <strong>bold</strong></button>"#
        );
    }

    #[test]
    fn heading_nested_in_placeholder() {
        assert_eq!(
            enhanced_header(r#"<div class="js-accordion__trigger"><h2>Titel</h2></div>"#),
            r#"<h2><button class="js-accordion__trigger" type="button">Titel</button></h2>"#
        );
    }

    #[test]
    fn nested_heading_with_formatted_children() {
        assert_eq!(
            enhanced_header(
                r#"<div class="js-accordion__trigger"><h2>Titel <strong>bold</strong></h2></div>"#
            ),
            r#"<h2><button class="js-accordion__trigger" type="button">Titel <strong>bold</strong></button></h2>"#
        );
    }

    #[test]
    fn heading_as_placeholder() {
        assert_eq!(
            enhanced_header(r#"<h2 class="js-accordion__trigger">Titel</h2>"#),
            r#"<h2><button class="js-accordion__trigger" type="button">Titel</button></h2>"#
        );
    }

    #[test]
    fn xss_content_is_sanitized() {
        assert_eq!(
            enhanced_header(
                r#"<button class="js-accordion__trigger">Titel <img src=x onerror="alert('XSS Attack')"></button>"#
            ),
            r#"<button class="js-accordion__trigger" type="button">Titel <img src="x"></button>"#
        );
    }

    #[test]
    fn heading_with_whitespace_is_not_wrapped() {
        // Only a sole child node counts; surrounding whitespace makes it plain.
        assert_eq!(
            enhanced_header("<div class=\"js-accordion__trigger\"> <h3>Titel</h3> </div>"),
            r#"<button class="js-accordion__trigger" type="button"> <h3>Titel</h3> </button>"#
        );
    }

    #[test]
    fn missing_trigger_leaves_markup_untouched() {
        let markup = accordion(r#"<div class="something-else">Titel</div>"#);
        let (mut doc, root, selectors) = setup(&markup);
        let before = doc.inner_html(doc.root());

        let err = enhance(&mut doc, root, &selectors, &HtmlSanitizer).unwrap_err();
        assert!(matches!(
            err,
            AccordionError::Structure { part: AccordionPart::Trigger, .. }
        ));
        assert_eq!(doc.inner_html(doc.root()), before);
    }

    #[test]
    fn missing_header_is_a_structure_error() {
        let (mut doc, root, selectors) =
            setup(r#"<div class="js-accordion"><div class="js-accordion__trigger">T</div></div>"#);
        let err = enhance(&mut doc, root, &selectors, &HtmlSanitizer).unwrap_err();
        assert!(matches!(
            err,
            AccordionError::Structure { part: AccordionPart::Header, .. }
        ));
    }

    #[test]
    fn sanitizer_failure_leaves_markup_untouched() {
        let markup = accordion(r#"<div class="js-accordion__trigger">Titel</div>"#);
        let (mut doc, root, selectors) = setup(&markup);
        let before = doc.inner_html(doc.root());

        let refuse = |_: &str| -> wf_accordion_dom::Result<String> { Err(DomError::sanitize("refused")) };
        let err = enhance(&mut doc, root, &selectors, &refuse).unwrap_err();
        assert!(matches!(err, AccordionError::Dom(DomError::Sanitize(_))));
        assert_eq!(doc.inner_html(doc.root()), before);
    }

    #[test]
    fn shape_priority() {
        let doc = Document::parse(
            "<h2 id=a><h3>x</h3></h2><div id=b><h4>x</h4></div><button id=c><h5>x</h5></button><button id=d>x</button><span id=e>x</span>",
        )
        .unwrap();
        let by_id = |id: &str| {
            let selector: SelectorList = format!("#{id}").parse().unwrap();
            doc.query_selector(doc.root(), &selector).unwrap()
        };

        assert_eq!(PlaceholderShape::inspect(&doc, by_id("a")), PlaceholderShape::IsHeading);
        assert!(matches!(
            PlaceholderShape::inspect(&doc, by_id("b")),
            PlaceholderShape::WrapsHeading { .. }
        ));
        assert!(matches!(
            PlaceholderShape::inspect(&doc, by_id("c")),
            PlaceholderShape::WrapsHeading { .. }
        ));
        assert_eq!(PlaceholderShape::inspect(&doc, by_id("d")), PlaceholderShape::AlreadyButton);
        assert_eq!(PlaceholderShape::inspect(&doc, by_id("e")), PlaceholderShape::Plain);
    }
}
