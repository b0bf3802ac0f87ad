//! Converts annotations back to their textual form.
//!
//! Scanned text is reproduced byte-for-byte from the borrowed segment
//! slices; clauses built in memory get the canonical layout
//! `{kind| attr, attr}`.

use crate::ast::*;
use std::fmt::Write;

/// `size: 24, color: red`
pub fn serialize_attributes(attributes: &[StyleAttribute]) -> String {
    let mut output = String::new();
    for (i, attribute) in attributes.iter().enumerate() {
        if i > 0 {
            output.push_str(", ");
        }
        let _ = write!(output, "{}", attribute);
    }
    output
}

/// `{style| size: 24, color: red}`
pub fn style_clause(attributes: &[StyleAttribute]) -> String {
    format!(
        "{{{}| {}}}",
        AnnotationKind::Style.keyword(),
        serialize_attributes(attributes)
    )
}

/// `{image| src: logo.svg, align: left}`
pub fn image_clause(source: &str, alignment: Alignment) -> String {
    format!(
        "{{{}| src: {}, align: {}}}",
        AnnotationKind::Image.keyword(),
        source,
        alignment
    )
}

/// Exact source of a scanned line
pub fn serialize_segments(segments: &[Segment<'_>]) -> String {
    segments.iter().map(|segment| segment.raw).collect()
}

/// Exact source of a scanned document
pub fn serialize_lines(lines: &[Vec<Segment<'_>>]) -> String {
    lines
        .iter()
        .map(|segments| serialize_segments(segments))
        .collect::<Vec<_>>()
        .join("\n")
}
