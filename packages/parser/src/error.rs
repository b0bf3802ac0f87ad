use std::ops::Range;
use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

/// Why a candidate annotation was rejected.
///
/// The scanner never surfaces these; a failed candidate becomes plain
/// text. They exist for [`crate::diagnose`] and for tests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Expected {expected} at {pos}")]
    Expected { pos: usize, expected: &'static str },

    #[error("Unexpected end of line at {pos}")]
    UnexpectedEol { pos: usize },

    #[error("Unknown annotation kind `{found}` at {pos}")]
    UnknownKind { pos: usize, found: String },

    #[error("Unknown attribute `{found}` at {pos}")]
    UnknownAttribute { pos: usize, found: String },

    #[error("Empty value at {pos}")]
    EmptyValue { pos: usize },

    #[error("Invalid alignment `{found}` at {pos}")]
    InvalidAlignment { pos: usize, found: String },

    #[error("Invalid size `{found}` at {pos}")]
    InvalidSize { pos: usize, found: String },

    #[error("Missing `{name}` attribute at {pos}")]
    MissingAttribute { pos: usize, name: &'static str },
}

impl ParseError {
    pub fn expected(pos: usize, expected: &'static str) -> Self {
        Self::Expected { pos, expected }
    }

    pub fn unexpected_eol(pos: usize) -> Self {
        Self::UnexpectedEol { pos }
    }

    pub fn pos(&self) -> usize {
        match self {
            ParseError::Expected { pos, .. }
            | ParseError::UnexpectedEol { pos }
            | ParseError::UnknownKind { pos, .. }
            | ParseError::UnknownAttribute { pos, .. }
            | ParseError::EmptyValue { pos }
            | ParseError::InvalidAlignment { pos, .. }
            | ParseError::InvalidSize { pos, .. }
            | ParseError::MissingAttribute { pos, .. } => *pos,
        }
    }

    /// Byte range the error points at
    pub fn span(&self) -> Range<usize> {
        let pos = self.pos();
        match self {
            ParseError::UnknownKind { found, .. }
            | ParseError::UnknownAttribute { found, .. }
            | ParseError::InvalidAlignment { found, .. }
            | ParseError::InvalidSize { found, .. } => pos..pos + found.len().max(1),
            _ => pos..pos + 1,
        }
    }

    pub fn label(&self) -> String {
        match self {
            ParseError::Expected { expected, .. } => format!("expected {}", expected),
            ParseError::UnexpectedEol { .. } => "annotation is not closed on this line".to_string(),
            ParseError::UnknownKind { .. } => "expected `style` or `image`".to_string(),
            ParseError::UnknownAttribute { .. } => "not an attribute of this annotation".to_string(),
            ParseError::EmptyValue { .. } => "value is empty".to_string(),
            ParseError::InvalidAlignment { .. } => "expected `left`, `right` or `center`".to_string(),
            ParseError::InvalidSize { .. } => "expected a positive integer".to_string(),
            ParseError::MissingAttribute { name, .. } => format!("add a `{}` attribute", name),
        }
    }
}

/// Pretty-print errors with source context using ariadne
#[cfg(feature = "pretty-errors")]
pub fn format_errors(source: &str, filename: &str, errors: &[ParseError]) -> String {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let mut output = Vec::new();

    for error in errors {
        let mut span = error.span();
        span.end = span.end.min(source.len());
        span.start = span.start.min(span.end);

        let report = Report::build(ReportKind::Warning, filename, span.start)
            .with_message(error.to_string())
            .with_label(
                Label::new((filename, span))
                    .with_color(Color::Yellow)
                    .with_message(error.label()),
            )
            .finish();

        if report.write((filename, Source::from(source)), &mut output).is_err() {
            return "Error formatting failed".to_string();
        }
    }

    String::from_utf8(output).unwrap_or_else(|_| "Error formatting failed".to_string())
}
