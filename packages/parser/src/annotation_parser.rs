//! Parser for inline annotations
//!
//! An annotation wraps a run of text in brackets and follows it with an
//! attribute clause:
//! ```text
//! [ nuits ]{style| color: dodger blue, size: 24}
//! [elm logo]{image| src: https://elm-lang.org/logo.svg, align: left}
//! ```
//!
//! Grammar (never crosses a newline):
//! ```text
//! annotation := '[' body ']' ws '{' kind '|' ws attr (',' ws attr)* '}'
//! kind       := "style" | "image"
//! style_attr := ("font" | "size" | "color" | "background color") ws ':' ws value
//! image_attr := ("src" | "align") ws ':' ws value
//! value      := chars up to ',' or '}', right-trimmed, non-empty
//! ```
//!
//! All syntax characters are ASCII, so every offset the parser stops at
//! is a char boundary even when bodies and values are not ASCII.

use crate::ast::{Alignment, Annotation, AnnotationKind, AttributeCategory, Bounds, StyleAttribute};
use crate::error::{ParseError, ParseResult};

/// Parse the annotation starting at `start` in `line`
pub fn parse_annotation(line: &str, start: usize) -> ParseResult<(Annotation, Bounds)> {
    AnnotationParser::new(line, start, line.len()).parse()
}

/// Single-attempt parser over `source[start..end]`.
///
/// Offsets in the result are absolute positions in `source`.
pub struct AnnotationParser<'src> {
    source: &'src str,
    pos: usize,
    end: usize,
    reached_clause: bool,
}

impl<'src> AnnotationParser<'src> {
    pub fn new(source: &'src str, start: usize, end: usize) -> Self {
        Self {
            source,
            pos: start,
            end: end.min(source.len()),
            reached_clause: false,
        }
    }

    /// True once the opening `{` was consumed, i.e. the candidate really
    /// looked like an annotation before it failed.
    pub fn reached_clause(&self) -> bool {
        self.reached_clause
    }

    pub fn parse(&mut self) -> ParseResult<(Annotation, Bounds)> {
        let body_start = self.pos;
        self.expect(b'[', "`[`")?;

        let close = match self.source[self.pos..self.end].find([']', '\n']) {
            Some(offset) if self.source.as_bytes()[self.pos + offset] == b']' => self.pos + offset,
            Some(offset) => return Err(ParseError::unexpected_eol(self.pos + offset)),
            None => return Err(ParseError::unexpected_eol(self.end)),
        };
        let body = self.source[self.pos..close].trim();
        self.pos = close + 1;
        let body_stop = self.pos;

        self.skip_ws();
        let style_start = self.pos;
        self.expect(b'{', "`{`")?;
        self.reached_clause = true;

        let kind = self.parse_kind()?;
        self.expect(b'|', "`|`")?;
        self.skip_ws();

        let annotation = match kind {
            AnnotationKind::Style => self.parse_style(body)?,
            AnnotationKind::Image => self.parse_image(body, style_start)?,
        };

        Ok((
            annotation,
            Bounds::new(body_start, body_stop, style_start, self.pos),
        ))
    }

    fn parse_kind(&mut self) -> ParseResult<AnnotationKind> {
        let start = self.pos;
        let word = self.take_while(|b| b.is_ascii_alphabetic());
        match word {
            "style" => Ok(AnnotationKind::Style),
            "image" => Ok(AnnotationKind::Image),
            _ if self.at_end() => Err(ParseError::unexpected_eol(self.pos)),
            _ => Err(ParseError::UnknownKind {
                pos: start,
                found: word.to_string(),
            }),
        }
    }

    fn parse_style(&mut self, body: &str) -> ParseResult<Annotation> {
        let mut attributes = Vec::new();

        loop {
            let category = self.parse_style_keyword()?;
            let (value_pos, value) = self.parse_value()?;

            let attribute = match category {
                AttributeCategory::Font => StyleAttribute::Font(value.to_string()),
                AttributeCategory::FontSize => match value.parse::<u32>() {
                    Ok(size) if size > 0 => StyleAttribute::FontSize(size),
                    _ => {
                        return Err(ParseError::InvalidSize {
                            pos: value_pos,
                            found: value.to_string(),
                        })
                    }
                },
                AttributeCategory::Color => StyleAttribute::Color(value.to_string()),
                AttributeCategory::BackgroundColor => {
                    StyleAttribute::BackgroundColor(value.to_string())
                }
            };
            attributes.push(attribute);

            if self.end_of_list()? {
                break;
            }
        }

        Ok(Annotation::Styled {
            body: body.to_string(),
            attributes,
        })
    }

    fn parse_image(&mut self, description: &str, style_start: usize) -> ParseResult<Annotation> {
        let mut source = None;
        let mut alignment = None;

        loop {
            let keyword_pos = self.pos;
            if self.eat_keyword("src") {
                let (_, value) = self.parse_value()?;
                source = Some(value.to_string());
            } else if self.eat_keyword("align") {
                let (value_pos, value) = self.parse_value()?;
                let parsed =
                    Alignment::from_keyword(value).ok_or_else(|| ParseError::InvalidAlignment {
                        pos: value_pos,
                        found: value.to_string(),
                    })?;
                alignment = Some(parsed);
            } else {
                return Err(self.unknown_attribute(keyword_pos));
            }

            if self.end_of_list()? {
                break;
            }
        }

        let source = source.ok_or(ParseError::MissingAttribute {
            pos: style_start,
            name: "src",
        })?;

        Ok(Annotation::Image {
            description: description.to_string(),
            source,
            alignment: alignment.unwrap_or_default(),
        })
    }

    fn parse_style_keyword(&mut self) -> ParseResult<AttributeCategory> {
        let start = self.pos;
        // "background color" must be tried before "color"
        for category in [
            AttributeCategory::BackgroundColor,
            AttributeCategory::Font,
            AttributeCategory::FontSize,
            AttributeCategory::Color,
        ] {
            if self.eat_keyword(category.keyword()) {
                return Ok(category);
            }
        }
        Err(self.unknown_attribute(start))
    }

    /// `ws ':' ws value`, returning the value position and trimmed text
    fn parse_value(&mut self) -> ParseResult<(usize, &'src str)> {
        self.skip_ws();
        self.expect(b':', "`:`")?;
        self.skip_ws();

        let start = self.pos;
        let raw = self.take_while(|b| b != b',' && b != b'}' && b != b'\n');
        if self.at_end() {
            return Err(ParseError::unexpected_eol(self.pos));
        }

        let value = raw.trim_end();
        if value.is_empty() {
            return Err(ParseError::EmptyValue { pos: start });
        }
        Ok((start, value))
    }

    /// Consume `,` ws (more attributes follow) or `}` (clause done)
    fn end_of_list(&mut self) -> ParseResult<bool> {
        match self.peek() {
            Some(b',') => {
                self.pos += 1;
                self.skip_ws();
                Ok(false)
            }
            Some(b'}') => {
                self.pos += 1;
                Ok(true)
            }
            Some(_) => Err(ParseError::expected(self.pos, "`,` or `}`")),
            None => Err(ParseError::unexpected_eol(self.pos)),
        }
    }

    fn unknown_attribute(&self, start: usize) -> ParseError {
        if self.at_end() {
            return ParseError::unexpected_eol(self.pos);
        }
        let rest = &self.source[start..self.end];
        let stop = rest.find([':', ',', '}']).unwrap_or(rest.len());
        ParseError::UnknownAttribute {
            pos: start,
            found: rest[..stop].trim_end().to_string(),
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.source[self.pos..self.end].starts_with(keyword) {
            self.pos += keyword.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, byte: u8, expected: &'static str) -> ParseResult<()> {
        match self.peek() {
            Some(b) if b == byte => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(ParseError::expected(self.pos, expected)),
            None => Err(ParseError::unexpected_eol(self.pos)),
        }
    }

    fn skip_ws(&mut self) {
        self.take_while(|b| b == b' ' || b == b'\t');
    }

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'src str {
        let start = self.pos;
        let bytes = self.source.as_bytes();
        while self.pos < self.end && pred(bytes[self.pos]) {
            self.pos += 1;
        }
        &self.source[start..self.pos]
    }

    fn peek(&self) -> Option<u8> {
        if self.at_end() {
            None
        } else {
            Some(self.source.as_bytes()[self.pos])
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.end
    }
}
