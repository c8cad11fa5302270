//! HTML fragment parsing and serialization.
//!
//! Parsing runs quick-xml in a lenient configuration: end-tag names are not
//! checked against start tags, stray end tags are tolerated and HTML-style
//! attributes (unquoted or without value) are accepted. On top of that the
//! tree builder knows the void elements, closes an end tag against the nearest
//! open element of the same name and keeps `script`/`style` bodies verbatim.

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::escape::resolve_html5_entity;
use quick_xml::events::{BytesStart, Event};
use wf_accordion_core::logging::targets;

use crate::document::Document;
use crate::error::{DomError, Result};
use crate::node::{NodeData, NodeId};

/// Elements that never have children or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose body is raw text.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

pub(crate) fn is_void(tag_name: &str) -> bool {
    VOID_ELEMENTS.contains(&tag_name)
}

fn is_raw_text(tag_name: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&tag_name)
}

/// Longest named reference worth looking up (`&CounterClockwiseContourIntegral;`).
const MAX_REFERENCE_LEN: usize = 32;

/// Resolve the body of one character reference, without `&` and `;`.
fn resolve_reference(reference: &str) -> Option<Cow<'static, str>> {
    if let Some(number) = reference.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse().ok()?,
        };
        return char::from_u32(code)
            .filter(|&c| c != '\0')
            .map(|c| Cow::Owned(c.to_string()));
    }
    resolve_html5_entity(reference).map(Cow::Borrowed)
}

/// Decode character references one at a time. A bare `&` or an unknown
/// reference stays literal and does not affect its neighbours.
fn decode(raw: &[u8]) -> String {
    let raw = String::from_utf8_lossy(raw);
    let mut out = String::with_capacity(raw.len());
    let mut rest: &str = &raw;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let reference = after
            .char_indices()
            .take(MAX_REFERENCE_LEN + 1)
            .find(|&(_, c)| c == ';')
            .and_then(|(end, _)| resolve_reference(&after[..end]).map(|resolved| (end, resolved)));
        match reference {
            Some((end, resolved)) => {
                out.push_str(&resolved);
                rest = &after[end + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn tag_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).to_ascii_lowercase()
}

/// Parse `markup` and append the resulting nodes to `parent`.
pub(crate) fn parse_into(doc: &mut Document, parent: NodeId, markup: &str) -> Result<()> {
    let mut reader = Reader::from_str(markup);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut open: Vec<(String, NodeId)> = Vec::new();

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader
            .read_event()
            .map_err(|err| DomError::parse(err.to_string(), position))?;
        let current = open.last().map(|(_, node)| *node).unwrap_or(parent);

        match event {
            Event::Start(start) => {
                let name = tag_name(&start);
                let element = create_element(doc, &start, &name, position)?;
                doc.append_child(current, element);

                if is_void(&name) {
                    continue;
                }
                if is_raw_text(&name) {
                    let body = reader
                        .read_text(start.name())
                        .map_err(|err| DomError::parse(err.to_string(), position))?;
                    if !body.is_empty() {
                        let text = doc.create_text(body.into_owned());
                        doc.append_child(element, text);
                    }
                    continue;
                }
                open.push((name, element));
            }
            Event::Empty(start) => {
                let name = tag_name(&start);
                let element = create_element(doc, &start, &name, position)?;
                doc.append_child(current, element);
            }
            Event::End(end) => {
                let name = String::from_utf8_lossy(end.name().as_ref()).to_ascii_lowercase();
                match open.iter().rposition(|(open_name, _)| *open_name == name) {
                    Some(index) => open.truncate(index),
                    None => {
                        tracing::trace!(target: targets::DOM, tag = %name, "ignoring stray end tag");
                    }
                }
            }
            Event::Text(text) => {
                let text = doc.create_text(decode(&text));
                doc.append_child(current, text);
            }
            Event::CData(cdata) => {
                let text = doc.create_text(String::from_utf8_lossy(&cdata).into_owned());
                doc.append_child(current, text);
            }
            Event::Comment(comment) => {
                let comment = doc.create_comment(String::from_utf8_lossy(&comment).into_owned());
                doc.append_child(current, comment);
            }
            Event::Eof => break,
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
    }

    Ok(())
}

fn create_element(
    doc: &mut Document,
    start: &BytesStart<'_>,
    name: &str,
    position: u64,
) -> Result<NodeId> {
    let element = doc.create_element(name);
    let attributes = doc.attributes_mut(element)?;
    for attr in start.html_attributes().with_checks(false) {
        let attr = attr.map_err(|err| DomError::parse(err.to_string(), position))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase();
        // First occurrence wins, as in browsers.
        if attributes.contains(&key) {
            continue;
        }
        attributes.set(key, decode(&attr.value));
    }
    Ok(element)
}

// =============================================================================
// Serialization
// =============================================================================

fn escape_text(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '\u{a0}']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

fn escape_attribute(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '"', '\u{a0}']) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Serialize `node` the way `outerHTML` does.
pub(crate) fn write_node(doc: &Document, node: NodeId, out: &mut String) {
    match doc.data(node) {
        Some(NodeData::Root) => {
            for &child in doc.children(node) {
                write_node(doc, child, out);
            }
        }
        Some(NodeData::Text(text)) => {
            let raw_parent = doc
                .parent(node)
                .and_then(|parent| doc.tag_name(parent))
                .is_some_and(is_raw_text);
            if raw_parent {
                out.push_str(text);
            } else {
                out.push_str(&escape_text(text));
            }
        }
        Some(NodeData::Comment(text)) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        Some(NodeData::Element(element)) => {
            out.push('<');
            out.push_str(&element.tag_name);
            for attr in &element.attributes {
                out.push(' ');
                out.push_str(&attr.name);
                out.push_str("=\"");
                out.push_str(&escape_attribute(&attr.value));
                out.push('"');
            }
            out.push('>');
            if is_void(&element.tag_name) {
                return;
            }
            for &child in doc.children(node) {
                write_node(doc, child, out);
            }
            out.push_str("</");
            out.push_str(&element.tag_name);
            out.push('>');
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(markup: &str) -> String {
        let doc = Document::parse(markup).expect("markup parses");
        doc.inner_html(doc.root())
    }

    #[test]
    fn attributes_are_normalized() {
        assert_eq!(
            round_trip(r#"<DIV Class=box hidden data-x='1'></DIV>"#),
            r#"<div class="box" hidden="" data-x="1"></div>"#
        );
    }

    #[test]
    fn void_elements_have_no_end_tag() {
        assert_eq!(
            round_trip(r#"Titel <img src="x"><br/>after"#),
            r#"Titel <img src="x"><br>after"#
        );
    }

    #[test]
    fn entities_are_decoded_and_reescaped() {
        let doc = Document::parse("<p>Fish &amp; Chips&nbsp;&#8211; &quot;fresh&quot;</p>").unwrap();
        let p = doc.children(doc.root())[0];
        assert_eq!(doc.text_content(p), "Fish & Chips\u{a0}\u{2013} \"fresh\"");
        assert_eq!(
            doc.inner_html(p),
            "Fish &amp; Chips&nbsp;\u{2013} \"fresh\""
        );
    }

    #[test]
    fn html5_named_references() {
        let doc = Document::parse("<p>Caf&eacute; &rsquo;n&rsquo; 3&times;4</p>").unwrap();
        let p = doc.children(doc.root())[0];
        assert_eq!(doc.text_content(p), "Caf\u{e9} \u{2019}n\u{2019} 3\u{d7}4");
    }

    #[test]
    fn unknown_reference_does_not_block_neighbours() {
        let doc = Document::parse("<p>Q&A &amp; B &bogus; &#x41;</p>").unwrap();
        let p = doc.children(doc.root())[0];
        assert_eq!(doc.text_content(p), "Q&A & B &bogus; A");
        assert_eq!(doc.inner_html(p), "Q&amp;A &amp; B &amp;bogus; A");
    }

    #[test]
    fn references_in_attributes() {
        let doc = Document::parse(r#"<a title="Caf&eacute; &amp; Bar">x</a>"#).unwrap();
        let a = doc.children(doc.root())[0];
        assert_eq!(doc.attribute(a, "title"), Some("Caf\u{e9} & Bar"));
    }

    #[test]
    fn bare_ampersand_is_kept() {
        let doc = Document::parse("<p>Q&A</p>").unwrap();
        let p = doc.children(doc.root())[0];
        assert_eq!(doc.text_content(p), "Q&A");
        assert_eq!(doc.inner_html(p), "Q&amp;A");
    }

    #[test]
    fn mismatched_end_tags_are_tolerated() {
        assert_eq!(
            round_trip("<div><p>one</div><span>two</span></em>"),
            "<div><p>one</p></div><span>two</span>"
        );
    }

    #[test]
    fn unclosed_elements_are_closed_at_end() {
        assert_eq!(round_trip("<div><p>open"), "<div><p>open</p></div>");
    }

    #[test]
    fn whitespace_is_preserved() {
        let markup = "\n  <h2>\n    Title\n  </h2>\n";
        assert_eq!(round_trip(markup), markup);
    }

    #[test]
    fn script_body_is_raw() {
        assert_eq!(
            round_trip("<script>if (a && b) { go(\"&amp;\"); }</script>"),
            "<script>if (a && b) { go(\"&amp;\"); }</script>"
        );
    }

    #[test]
    fn comments_survive() {
        assert_eq!(round_trip("<!-- note --><p>x</p>"), "<!-- note --><p>x</p>");
    }

    #[test]
    fn duplicate_attribute_keeps_first() {
        assert_eq!(round_trip(r#"<a id="one" id="two"></a>"#), r#"<a id="one"></a>"#);
    }

    #[test]
    fn unterminated_tag_is_an_error() {
        let err = Document::parse(r#"<a href="x>broken"#).unwrap_err();
        assert!(matches!(err, DomError::Parse { .. }));
    }
}
