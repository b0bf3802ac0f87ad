//! # notemark parser
//!
//! Annotation mini-language embedded in note bodies:
//! `[text]{style| color: red}` spans and `[alt]{image| src: ..., align: left}`
//! directives. Malformed candidates are never errors to the caller; they
//! scan as plain text.

pub mod annotation_parser;
pub mod ast;
pub mod error;
pub mod scanner;
pub mod serializer;

pub use annotation_parser::{parse_annotation, AnnotationParser};
pub use ast::{Alignment, Annotation, AnnotationKind, AttributeCategory, Bounds, Segment, StyleAttribute};
#[cfg(feature = "pretty-errors")]
pub use error::format_errors;
pub use error::{ParseError, ParseResult};
pub use scanner::{diagnose, line_spans, scan_document, scan_line, Scanner};
pub use serializer::{
    image_clause, serialize_attributes, serialize_lines, serialize_segments,
    style_clause,
};
