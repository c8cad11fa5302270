//! Markup sanitization.
//!
//! Trigger content is copied from author markup into a freshly built button.
//! Before it is inserted it runs through a [`Sanitizer`], so script-capable
//! constructs never reach the enhanced tree.

use lol_html::{RewriteStrSettings, element, rewrite_str};
use wf_accordion_core::logging::targets;

use crate::error::{DomError, Result};

/// Turns untrusted markup into markup that is safe to insert.
pub trait Sanitizer: Send + Sync {
    /// Sanitize an HTML fragment.
    fn sanitize(&self, html: &str) -> Result<String>;
}

impl<F> Sanitizer for F
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    fn sanitize(&self, html: &str) -> Result<String> {
        self(html)
    }
}

/// Elements dropped together with their content.
const BLOCKED_ELEMENTS: &str = "script, style, iframe, object, embed, frame, frameset, noscript, \
                                template, link, meta, base";

/// Attributes that carry URLs.
const URL_ATTRIBUTES: &[&str] = &["href", "src", "action", "formaction", "xlink:href"];

/// URL schemes that execute code.
const BLOCKED_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:text/html"];

fn is_dangerous_url(value: &str) -> bool {
    // Browsers ignore ASCII whitespace and control characters inside the scheme.
    let normalized: String = value
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .collect::<String>()
        .to_ascii_lowercase();
    BLOCKED_SCHEMES
        .iter()
        .any(|scheme| normalized.starts_with(scheme))
}

/// Default sanitizer built on `lol_html`.
///
/// Removes script-capable elements with their content, every `on*` event
/// handler attribute and URL attributes with executable schemes. Everything
/// else, including its formatting, passes through unchanged.
///
/// ```
/// use wf_accordion_dom::{HtmlSanitizer, Sanitizer};
///
/// let clean = HtmlSanitizer.sanitize(r#"Titel <img src="x" onerror="alert(1)"><script>x()</script>"#)?;
/// assert_eq!(clean, r#"Titel <img src="x">"#);
/// # Ok::<(), wf_accordion_dom::DomError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlSanitizer;

impl Sanitizer for HtmlSanitizer {
    fn sanitize(&self, html: &str) -> Result<String> {
        let output = rewrite_str(
            html,
            RewriteStrSettings {
                element_content_handlers: vec![
                    element!(BLOCKED_ELEMENTS, |el| {
                        tracing::debug!(
                            target: targets::SANITIZE,
                            tag = %el.tag_name(),
                            "removing blocked element"
                        );
                        el.remove();
                        Ok(())
                    }),
                    element!("*", |el| {
                        let names: Vec<String> =
                            el.attributes().iter().map(|attr| attr.name()).collect();
                        for name in names {
                            let strip = name.starts_with("on")
                                || (URL_ATTRIBUTES.contains(&name.as_str())
                                    && el.get_attribute(&name).is_some_and(|v| is_dangerous_url(&v)));
                            if strip {
                                tracing::debug!(
                                    target: targets::SANITIZE,
                                    attribute = %name,
                                    "removing unsafe attribute"
                                );
                                el.remove_attribute(&name);
                            }
                        }
                        Ok(())
                    }),
                ],
                ..Default::default()
            },
        );

        output.map_err(|err| DomError::sanitize(err.to_string()))
    }
}
