// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use memchr::memchr;
use smallvec::SmallVec;
use smol_str::SmolStr;

use super::entity::{decode_entities, EntityError};
use super::name::{is_void_element, validate_markup_name, MarkupNameError};
use crate::model::markup_ast::{Attribute, MarkupAst, MarkupElement, MarkupNode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupParseError {
    UnterminatedTag {
        line: usize,
    },
    UnterminatedComment {
        line: usize,
    },
    UnsupportedSyntax {
        line: usize,
        text: String,
    },
    EmptyTag {
        line: usize,
    },
    InvalidElementName {
        line: usize,
        name: String,
        reason: MarkupNameError,
    },
    InvalidAttributeName {
        line: usize,
        name: String,
        reason: MarkupNameError,
    },
    UnquotedAttributeValue {
        line: usize,
        attribute: String,
    },
    UnterminatedAttributeValue {
        line: usize,
        attribute: String,
    },
    InvalidEntity {
        line: usize,
        reason: EntityError,
    },
    StrayClosingTag {
        line: usize,
        name: String,
    },
    MismatchedClosingTag {
        line: usize,
        expected: String,
        found: String,
    },
    ClosingTagWithAttributes {
        line: usize,
        name: String,
    },
    UnclosedElement {
        line: usize,
        name: String,
    },
}

impl fmt::Display for MarkupParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedTag { line } => write!(f, "unterminated tag on line {line}"),
            Self::UnterminatedComment { line } => {
                write!(f, "unterminated comment starting on line {line}")
            }
            Self::UnsupportedSyntax { line, text } => {
                write!(f, "unsupported markup syntax on line {line}: {text}")
            }
            Self::EmptyTag { line } => write!(f, "empty tag on line {line}"),
            Self::InvalidElementName { line, name, reason } => {
                write!(f, "invalid element name on line {line}: {name} ({reason})")
            }
            Self::InvalidAttributeName { line, name, reason } => {
                write!(f, "invalid attribute name on line {line}: {name} ({reason})")
            }
            Self::UnquotedAttributeValue { line, attribute } => write!(
                f,
                "value of attribute '{attribute}' on line {line} must be quoted with ' or \""
            ),
            Self::UnterminatedAttributeValue { line, attribute } => {
                write!(f, "unterminated value for attribute '{attribute}' on line {line}")
            }
            Self::InvalidEntity { line, reason } => {
                write!(f, "invalid character reference on line {line}: {reason}")
            }
            Self::StrayClosingTag { line, name } => {
                write!(f, "closing tag </{name}> on line {line} has no matching open element")
            }
            Self::MismatchedClosingTag { line, expected, found } => write!(
                f,
                "mismatched closing tag on line {line}: expected </{expected}>, found </{found}>"
            ),
            Self::ClosingTagWithAttributes { line, name } => {
                write!(f, "closing tag </{name}> on line {line} must not carry attributes")
            }
            Self::UnclosedElement { line, name } => {
                write!(f, "element <{name}> opened on line {line} is never closed")
            }
        }
    }
}

impl std::error::Error for MarkupParseError {}

struct OpenElement {
    name: SmolStr,
    attributes: SmallVec<[Attribute; 4]>,
    line: usize,
    children: Vec<MarkupNode>,
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0, line: 1 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Advances by `len` bytes, keeping the line counter in sync.
    fn advance(&mut self, len: usize) {
        let skipped = &self.input.as_bytes()[self.pos..self.pos + len];
        self.line += skipped.iter().filter(|b| **b == b'\n').count();
        self.pos += len;
    }

    /// Consumes up to the next `<` (exclusive) and returns the raw run with
    /// the line it started on.
    fn take_text_run(&mut self) -> (&'a str, usize) {
        let start_line = self.line;
        let rest = self.rest();
        let end = memchr(b'<', rest.as_bytes()).unwrap_or(rest.len());
        self.advance(end);
        (&rest[..end], start_line)
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        let end = rest.len() - rest.trim_start().len();
        self.advance(end);
    }

    /// Consumes a name token: everything up to a tag delimiter. Validation
    /// happens at the call site so error variants can name the context.
    fn take_name_token(&mut self) -> &'a str {
        let rest = self.rest();
        let end = rest
            .char_indices()
            .find(|(_, ch)| ch.is_whitespace() || matches!(ch, '>' | '/' | '=' | '"' | '\''))
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());
        self.advance(end);
        &rest[..end]
    }
}

fn push_node(stack: &mut [OpenElement], roots: &mut Vec<MarkupNode>, node: MarkupNode) {
    match stack.last_mut() {
        Some(open) => open.children.push(node),
        None => roots.push(node),
    }
}

fn line_snippet(parser: &Parser<'_>) -> String {
    let rest = parser.rest();
    let end = memchr(b'\n', rest.as_bytes()).unwrap_or(rest.len());
    rest[..end].trim_end().chars().take(40).collect()
}

/// Parses an HTML-flavored markup fragment into a render description.
///
/// Accepted:
/// - elements `<name ...>...</name>`, self-closing `<name ... />`
/// - void elements (`br`, `hr`, `img`, ...) with or without the slash
/// - bare boolean attributes and quoted values (`'` or `"`)
/// - character references in text and quoted values
/// - comments `<!-- ... -->` (skipped)
/// - any number of root nodes; whitespace-only text runs between elements
///   are dropped, all other text is kept verbatim
///
/// Everything else is rejected with a line-numbered error.
pub fn parse_markup(input: &str) -> Result<MarkupAst, MarkupParseError> {
    let mut parser = Parser::new(input);
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut roots: Vec<MarkupNode> = Vec::new();

    loop {
        let (raw_text, text_line) = parser.take_text_run();
        if !raw_text.chars().all(char::is_whitespace) {
            let decoded = decode_entities(raw_text)
                .map_err(|reason| MarkupParseError::InvalidEntity { line: text_line, reason })?;
            push_node(&mut stack, &mut roots, MarkupNode::Text(decoded));
        }

        if parser.at_eof() {
            break;
        }

        let tag_line = parser.line;
        parser.advance(1); // '<'

        match parser.peek() {
            None => return Err(MarkupParseError::UnterminatedTag { line: tag_line }),
            Some('!') => parse_comment(&mut parser, tag_line)?,
            Some('/') => {
                parser.advance(1);
                parse_closing_tag(&mut parser, &mut stack, &mut roots, tag_line)?;
            }
            Some('>') => {
                return Err(MarkupParseError::EmptyTag { line: tag_line });
            }
            Some(_) => parse_open_tag(&mut parser, &mut stack, &mut roots, tag_line)?,
        }
    }

    if let Some(open) = stack.last() {
        return Err(MarkupParseError::UnclosedElement {
            line: open.line,
            name: open.name.to_string(),
        });
    }

    Ok(MarkupAst::new(roots))
}

fn parse_comment(parser: &mut Parser<'_>, tag_line: usize) -> Result<(), MarkupParseError> {
    // Only `<!--` is recognized; doctypes and CDATA are not part of the
    // fragment language.
    if !parser.rest().starts_with("!--") {
        return Err(MarkupParseError::UnsupportedSyntax {
            line: tag_line,
            text: format!("<{}", line_snippet(parser)),
        });
    }
    parser.advance(3);

    match parser.rest().find("-->") {
        Some(end) => {
            parser.advance(end + 3);
            Ok(())
        }
        None => Err(MarkupParseError::UnterminatedComment { line: tag_line }),
    }
}

fn parse_closing_tag(
    parser: &mut Parser<'_>,
    stack: &mut Vec<OpenElement>,
    roots: &mut Vec<MarkupNode>,
    tag_line: usize,
) -> Result<(), MarkupParseError> {
    let raw_name = parser.take_name_token();
    if raw_name.is_empty() && parser.peek() == Some('>') {
        return Err(MarkupParseError::EmptyTag { line: tag_line });
    }
    validate_markup_name(raw_name).map_err(|reason| MarkupParseError::InvalidElementName {
        line: tag_line,
        name: raw_name.to_owned(),
        reason,
    })?;

    parser.skip_whitespace();
    match parser.peek() {
        Some('>') => parser.advance(1),
        Some(_) => {
            return Err(MarkupParseError::ClosingTagWithAttributes {
                line: tag_line,
                name: raw_name.to_owned(),
            });
        }
        None => return Err(MarkupParseError::UnterminatedTag { line: tag_line }),
    }

    let Some(open) = stack.pop() else {
        return Err(MarkupParseError::StrayClosingTag {
            line: tag_line,
            name: raw_name.to_owned(),
        });
    };

    if open.name != raw_name {
        return Err(MarkupParseError::MismatchedClosingTag {
            line: tag_line,
            expected: open.name.to_string(),
            found: raw_name.to_owned(),
        });
    }

    let element = MarkupElement::new(open.name, open.attributes, open.children, open.line);
    push_node(stack, roots, MarkupNode::Element(element));
    Ok(())
}

fn parse_open_tag(
    parser: &mut Parser<'_>,
    stack: &mut Vec<OpenElement>,
    roots: &mut Vec<MarkupNode>,
    tag_line: usize,
) -> Result<(), MarkupParseError> {
    let raw_name = parser.take_name_token();
    validate_markup_name(raw_name).map_err(|reason| MarkupParseError::InvalidElementName {
        line: tag_line,
        name: raw_name.to_owned(),
        reason,
    })?;
    let name = SmolStr::new(raw_name);

    let mut attributes: SmallVec<[Attribute; 4]> = SmallVec::new();
    let self_closing = loop {
        parser.skip_whitespace();
        match parser.peek() {
            None => return Err(MarkupParseError::UnterminatedTag { line: tag_line }),
            Some('>') => {
                parser.advance(1);
                break false;
            }
            Some('/') => {
                parser.advance(1);
                if parser.peek() != Some('>') {
                    return Err(MarkupParseError::UnsupportedSyntax {
                        line: parser.line,
                        text: format!("/{}", line_snippet(parser)),
                    });
                }
                parser.advance(1);
                break true;
            }
            Some(_) => {
                let attribute = parse_attribute(parser)?;
                attributes.push(attribute);
            }
        }
    };

    if self_closing || is_void_element(&name) {
        let element = MarkupElement::new(name, attributes, Vec::new(), tag_line);
        push_node(stack, roots, MarkupNode::Element(element));
    } else {
        stack.push(OpenElement { name, attributes, line: tag_line, children: Vec::new() });
    }
    Ok(())
}

fn parse_attribute(parser: &mut Parser<'_>) -> Result<Attribute, MarkupParseError> {
    let attr_line = parser.line;
    let raw_name = parser.take_name_token();
    validate_markup_name(raw_name).map_err(|reason| MarkupParseError::InvalidAttributeName {
        line: attr_line,
        name: raw_name.to_owned(),
        reason,
    })?;

    parser.skip_whitespace();
    if parser.peek() != Some('=') {
        return Ok(Attribute::new(raw_name, None));
    }
    parser.advance(1);
    parser.skip_whitespace();

    let quote = match parser.peek() {
        Some(quote @ ('"' | '\'')) => quote,
        _ => {
            return Err(MarkupParseError::UnquotedAttributeValue {
                line: parser.line,
                attribute: raw_name.to_owned(),
            });
        }
    };
    parser.advance(1);

    let value_line = parser.line;
    let rest = parser.rest();
    let Some(end) = memchr(quote as u8, rest.as_bytes()) else {
        return Err(MarkupParseError::UnterminatedAttributeValue {
            line: value_line,
            attribute: raw_name.to_owned(),
        });
    };
    let raw_value = &rest[..end];
    parser.advance(end + 1);

    let value = decode_entities(raw_value)
        .map_err(|reason| MarkupParseError::InvalidEntity { line: value_line, reason })?;
    Ok(Attribute::new(raw_name, Some(value)))
}
