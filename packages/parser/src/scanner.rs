//! Line-scoped scanner
//!
//! Splits a line into an ordered, gap-free list of [`Segment`]s: parsed
//! annotations and the literal runs between them. A `[` that does not
//! start a valid annotation is literal text, and the scan resumes one
//! byte later. No two plain segments are ever adjacent.

use crate::annotation_parser::AnnotationParser;
use crate::ast::{Annotation, Segment};
use crate::error::ParseError;
use std::ops::Range;
use tracing::trace;

/// Scanner over one line of a larger source
pub struct Scanner<'src> {
    source: &'src str,
    line: Range<usize>,
}

impl<'src> Scanner<'src> {
    /// `line` must not contain a newline; offsets produced are absolute in `source`
    pub fn new(source: &'src str, line: Range<usize>) -> Self {
        Self { source, line }
    }

    pub fn scan(&self) -> Vec<Segment<'src>> {
        self.walk(|_, _| {})
    }

    /// Failed candidates that got as far as their `{`
    pub fn diagnose(&self) -> Vec<ParseError> {
        let mut errors = Vec::new();
        self.walk(|parser, error| {
            if parser.reached_clause() {
                errors.push(error);
            }
        });
        errors
    }

    fn walk(&self, mut on_reject: impl FnMut(&AnnotationParser<'src>, ParseError)) -> Vec<Segment<'src>> {
        let mut segments = Vec::new();
        let end = self.line.end;
        let mut plain_start = self.line.start;
        let mut pos = self.line.start;

        while pos < end {
            match self.source[pos..end].find('[') {
                Some(offset) => pos += offset,
                None => break,
            }

            let mut parser = AnnotationParser::new(self.source, pos, end);
            match parser.parse() {
                Ok((annotation, bounds)) => {
                    self.push_plain(&mut segments, plain_start..pos);
                    segments.push(Segment {
                        annotation,
                        span: bounds.whole(),
                        raw: &self.source[bounds.whole()],
                        bounds: Some(bounds),
                    });
                    pos = bounds.style_stop;
                    plain_start = pos;
                }
                Err(error) => {
                    trace!(pos, %error, "bracket is literal text");
                    on_reject(&parser, error);
                    pos += 1;
                }
            }
        }

        self.push_plain(&mut segments, plain_start..end);
        segments
    }

    fn push_plain(&self, segments: &mut Vec<Segment<'src>>, span: Range<usize>) {
        if span.is_empty() {
            return;
        }
        let raw = &self.source[span.clone()];
        segments.push(Segment {
            annotation: Annotation::plain(raw),
            span,
            raw,
            bounds: None,
        });
    }
}

/// Scan a single line; offsets are relative to the line
pub fn scan_line(line: &str) -> Vec<Segment<'_>> {
    Scanner::new(line, 0..line.len()).scan()
}

/// Scan every line of `text`; offsets are relative to the document
pub fn scan_document(text: &str) -> Vec<Vec<Segment<'_>>> {
    line_spans(text)
        .into_iter()
        .map(|line| Scanner::new(text, line).scan())
        .collect()
}

/// Every rejected annotation candidate in `text`, with document offsets
pub fn diagnose(text: &str) -> Vec<ParseError> {
    line_spans(text)
        .into_iter()
        .flat_map(|line| Scanner::new(text, line).diagnose())
        .collect()
}

/// `[start, stop)` of each `\n`-separated line, newline excluded
pub fn line_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = 0;
    for (i, byte) in text.bytes().enumerate() {
        if byte == b'\n' {
            spans.push(start..i);
            start = i + 1;
        }
    }
    spans.push(start..text.len());
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::StyleAttribute;

    fn plain(text: &str) -> Annotation {
        Annotation::plain(text)
    }

    fn colored(body: &str, color: &str) -> Annotation {
        Annotation::Styled {
            body: body.to_string(),
            attributes: vec![StyleAttribute::Color(color.to_string())],
        }
    }

    #[test]
    fn test_scan_mixed_line() {
        let line = " [ nuits ]{style| color: dodger blue} : [ 150 ]{style| color: crimson} €";
        let annotations: Vec<_> = scan_line(line).into_iter().map(|s| s.annotation).collect();

        assert_eq!(
            annotations,
            vec![
                plain(" "),
                colored("nuits", "dodger blue"),
                plain(" : "),
                colored("150", "crimson"),
                plain(" €"),
            ]
        );
    }

    #[test]
    fn test_failed_brackets_coalesce_into_one_plain() {
        let segments = scan_line("a [b] [c]{nope| x: y} [d");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].annotation, plain("a [b] [c]{nope| x: y} [d"));
    }

    #[test]
    fn test_bracket_inside_failed_candidate_can_start_annotation() {
        let line = "[x [y]{style| color: red}";
        let segments = scan_line(line);

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].annotation, colored("x [y", "red"));

        let line = "[x] [y]{style| color: red}";
        let segments = scan_line(line);
        assert_eq!(segments[0].annotation, plain("[x] "));
        assert_eq!(segments[1].annotation, colored("y", "red"));
    }

    #[test]
    fn test_segments_cover_line_without_gaps() {
        let line = "[a]{style| font: Lato}[b]{image| src: b.png} tail [";
        let segments = scan_line(line);

        let mut cursor = 0;
        for segment in &segments {
            assert_eq!(segment.span.start, cursor);
            assert_eq!(&line[segment.span.clone()], segment.raw);
            cursor = segment.span.end;
        }
        assert_eq!(cursor, line.len());
        assert!(segments.windows(2).all(|w| !(w[0].is_plain() && w[1].is_plain())));
    }

    #[test]
    fn test_empty_line_has_no_segments() {
        assert!(scan_line("").is_empty());
    }

    #[test]
    fn test_scan_document_uses_absolute_offsets() {
        let text = "first line\nsay [hi]{style| color: red}\n";
        let lines = scan_document(text);

        assert_eq!(lines.len(), 3);
        let bounds = lines[1][1].bounds.unwrap();
        assert_eq!(bounds.body_start, 15);
        assert_eq!(&text[bounds.whole()], "[hi]{style| color: red}");
        assert!(lines[2].is_empty());
    }

    #[test]
    fn test_line_spans() {
        assert_eq!(line_spans("ab\n\ncd"), vec![0..2, 3..3, 4..6]);
        assert_eq!(line_spans(""), vec![0..0]);
    }

    #[test]
    fn test_diagnose_reports_only_clause_failures() {
        let text = "plain [link] here\n[a]{style| size: huge}";
        let errors = diagnose(text);

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0],
            ParseError::InvalidSize {
                pos: 35,
                found: "huge".to_string()
            }
        );
    }
}
