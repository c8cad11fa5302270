//! Selector parser using the `cssparser` crate.

use cssparser::{ParseError as CssParseError, Parser, ParserInput, Token};

use super::{
    AttributeMatcher, AttributeSelector, Combinator, PseudoClass, Selector, SelectorList,
    SelectorPart, TypeSelector,
};
use crate::error::{DomError, Result};

/// Incremental builder for one complex selector.
#[derive(Default)]
struct SelectorBuilder {
    parts: Vec<SelectorPart>,
    combinators: Vec<Combinator>,
    current: SelectorPart,
    pending: Option<Combinator>,
}

impl SelectorBuilder {
    /// Called before a simple selector is added to the current compound.
    fn begin_simple(&mut self) {
        if self.current.is_empty()
            && let Some(combinator) = self.pending.take()
        {
            self.combinators.push(combinator);
        }
    }

    fn whitespace(&mut self) {
        if !self.current.is_empty() {
            self.parts.push(std::mem::take(&mut self.current));
            self.pending = Some(Combinator::Descendant);
        }
    }

    fn combinator(&mut self, input: &str, combinator: Combinator) -> Result<()> {
        if !self.current.is_empty() {
            self.parts.push(std::mem::take(&mut self.current));
            self.pending = Some(combinator);
            return Ok(());
        }
        match self.pending {
            Some(Combinator::Descendant) => {
                self.pending = Some(combinator);
                Ok(())
            }
            _ => Err(DomError::invalid_selector(input, "Unexpected combinator")),
        }
    }

    fn finish(mut self, input: &str) -> Result<Selector> {
        if !self.current.is_empty() {
            self.parts.push(self.current);
        } else if matches!(
            self.pending,
            Some(Combinator::Child | Combinator::AdjacentSibling | Combinator::GeneralSibling)
        ) {
            return Err(DomError::invalid_selector(input, "Dangling combinator"));
        }

        if self.parts.is_empty() {
            return Err(DomError::invalid_selector(input, "Empty selector"));
        }
        Ok(Selector {
            parts: self.parts,
            combinators: self.combinators,
        })
    }
}

/// Parse a comma-separated selector list.
pub(crate) fn parse_selector_list(input: &str) -> Result<SelectorList> {
    let mut parser_input = ParserInput::new(input);
    let mut parser = Parser::new(&mut parser_input);

    let mut selectors = Vec::new();
    let mut builder = SelectorBuilder::default();

    loop {
        let token = match parser.next_including_whitespace() {
            Ok(t) => t.clone(),
            Err(_) => break,
        };

        match &token {
            Token::WhiteSpace(_) => builder.whitespace(),

            Token::Comma => {
                selectors.push(std::mem::take(&mut builder).finish(input)?);
            }

            Token::Delim('>') => builder.combinator(input, Combinator::Child)?,
            Token::Delim('+') => builder.combinator(input, Combinator::AdjacentSibling)?,
            Token::Delim('~') => builder.combinator(input, Combinator::GeneralSibling)?,

            Token::Ident(name) => {
                builder.begin_simple();
                if !builder.current.is_empty() {
                    return Err(DomError::invalid_selector(
                        input,
                        format!("Type selector '{}' must come first", name),
                    ));
                }
                builder.current.type_selector =
                    Some(TypeSelector::Type(name.to_ascii_lowercase()));
            }

            Token::Delim('*') => {
                builder.begin_simple();
                if builder.current.type_selector.is_none() {
                    builder.current.type_selector = Some(TypeSelector::Universal);
                }
            }

            Token::Delim('.') => {
                builder.begin_simple();
                let class = parser
                    .expect_ident()
                    .map_err(|_| DomError::invalid_selector(input, "Expected class name after '.'"))?;
                builder.current.classes.push(class.to_string());
            }

            Token::IDHash(id) | Token::Hash(id) => {
                builder.begin_simple();
                if builder.current.id.is_some() {
                    return Err(DomError::invalid_selector(input, "Duplicate ID selector"));
                }
                builder.current.id = Some(id.to_string());
            }

            Token::SquareBracketBlock => {
                builder.begin_simple();
                let attribute = parser
                    .parse_nested_block(|p| parse_attribute(p))
                    .map_err(|_: CssParseError<'_, ()>| {
                        DomError::invalid_selector(input, "Invalid attribute selector")
                    })?;
                builder.current.attributes.push(attribute);
            }

            Token::Colon => {
                builder.begin_simple();
                let pseudo = parse_pseudo_class(&mut parser, input)?;
                builder.current.pseudo_classes.push(pseudo);
            }

            other => {
                return Err(DomError::invalid_selector(
                    input,
                    format!("Unexpected token {:?}", other),
                ));
            }
        }
    }

    selectors.push(builder.finish(input)?);
    Ok(SelectorList { selectors })
}

fn parse_pseudo_class(parser: &mut Parser<'_, '_>, input: &str) -> Result<PseudoClass> {
    let token = parser
        .next_including_whitespace()
        .map(|t| t.clone())
        .map_err(|_| DomError::invalid_selector(input, "Expected pseudo-class name after ':'"))?;

    match &token {
        Token::Ident(name) => PseudoClass::from_css(name).ok_or_else(|| {
            DomError::invalid_selector(input, format!("Unknown pseudo-class ':{}'", name))
        }),
        Token::Function(name) if name.eq_ignore_ascii_case("not") => {
            let inner = parser
                .parse_nested_block(|p| parse_simple_selector(p))
                .map_err(|_: CssParseError<'_, ()>| {
                    DomError::invalid_selector(input, "Invalid :not() argument")
                })?;
            Ok(PseudoClass::Not(Box::new(inner)))
        }
        Token::Function(name) => Err(DomError::invalid_selector(
            input,
            format!("Unsupported pseudo-class ':{}()'", name),
        )),
        _ => Err(DomError::invalid_selector(
            input,
            "Expected pseudo-class name after ':'",
        )),
    }
}

/// Parse the inside of `[...]`.
fn parse_attribute<'i>(
    parser: &mut Parser<'i, '_>,
) -> std::result::Result<AttributeSelector, CssParseError<'i, ()>> {
    let name = parser.expect_ident()?.to_ascii_lowercase();

    let operator = match parser.next() {
        Err(_) => return Ok(AttributeSelector::exists(name)),
        Ok(token) => token.clone(),
    };

    let value = match parser.next()?.clone() {
        Token::Ident(v) | Token::QuotedString(v) => v.to_string(),
        other => return Err(parser.new_unexpected_token_error(other)),
    };
    parser.expect_exhausted()?;

    let matcher = match operator {
        Token::Delim('=') => AttributeMatcher::Equals(value),
        Token::IncludeMatch => AttributeMatcher::Includes(value),
        Token::DashMatch => AttributeMatcher::DashMatch(value),
        Token::PrefixMatch => AttributeMatcher::Prefix(value),
        Token::SuffixMatch => AttributeMatcher::Suffix(value),
        Token::SubstringMatch => AttributeMatcher::Substring(value),
        other => return Err(parser.new_unexpected_token_error(other)),
    };

    Ok(AttributeSelector { name, matcher })
}

/// Parse a compound selector (for the :not() argument).
fn parse_simple_selector<'i>(
    parser: &mut Parser<'i, '_>,
) -> std::result::Result<SelectorPart, CssParseError<'i, ()>> {
    let mut part = SelectorPart::default();

    parser.skip_whitespace();

    while let Ok(token) = parser.next_including_whitespace() {
        match token.clone() {
            Token::Ident(name) => {
                part.type_selector = Some(TypeSelector::Type(name.to_ascii_lowercase()));
            }
            Token::Delim('*') => {
                part.type_selector = Some(TypeSelector::Universal);
            }
            Token::Delim('.') => {
                let class = parser.expect_ident()?;
                part.classes.push(class.to_string());
            }
            Token::IDHash(id) | Token::Hash(id) => {
                part.id = Some(id.to_string());
            }
            Token::SquareBracketBlock => {
                let attribute = parser.parse_nested_block(|p| parse_attribute(p))?;
                part.attributes.push(attribute);
            }
            Token::WhiteSpace(_) => {}
            other => return Err(parser.new_unexpected_token_error(other)),
        }
    }

    if part.is_empty() {
        return Err(parser.new_custom_error(()));
    }
    Ok(part)
}
