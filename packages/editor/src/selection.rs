//! # Selection
//!
//! Selections arrive from the host widget as raw byte ranges. Before any
//! edit, a selection whose start falls in an annotation's clause is
//! snapped to that whole clause, and the annotation becomes "current".
//! Custom-style edits therefore always act on whole annotations.

use crate::index::OffsetIndex;
use notemark_parser::{Annotation, Bounds};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Half-open byte range `[start, stop)`; `start == stop` is a cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Selection {
    pub start: usize,
    pub stop: usize,
}

impl Selection {
    /// Endpoints may come in either order
    pub fn new(start: usize, stop: usize) -> Self {
        Self {
            start: start.min(stop),
            stop: start.max(stop),
        }
    }

    pub fn cursor(at: usize) -> Self {
        Self { start: at, stop: at }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.stop
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.stop
    }

    pub fn len(&self) -> usize {
        self.stop - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.is_collapsed()
    }
}

impl From<Range<usize>> for Selection {
    fn from(range: Range<usize>) -> Self {
        Selection::new(range.start, range.end)
    }
}

/// The annotation the effective selection is snapped to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAnnotation {
    pub bounds: Bounds,
    pub annotation: Annotation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Selection the engine works with
    pub selection: Selection,
    pub current: Option<CurrentAnnotation>,
}

/// Snap `reported` to the clause of the annotation enclosing its start
pub fn resolve_selection(reported: Selection, index: &OffsetIndex) -> Resolution {
    match index.find_enclosing(reported.start) {
        Some((bounds, annotation)) => Resolution {
            selection: Selection::from(bounds.clause()),
            current: Some(CurrentAnnotation {
                bounds: *bounds,
                annotation: annotation.clone(),
            }),
        },
        None => Resolution {
            selection: reported,
            current: None,
        },
    }
}

/// Bold/italic/heading are allowed on non-empty selections that do not
/// cut through annotation syntax.
pub fn can_plain_markdown_style(selection: Selection, index: &OffsetIndex) -> bool {
    !selection.is_collapsed() && !index.overlaps_partially(selection.start, selection.stop)
}

/// Custom styles are allowed on plain text, or on exactly one whole
/// annotation once the selection has been resolved.
pub fn can_custom_style(
    selection: Selection,
    current: Option<&CurrentAnnotation>,
    index: &OffsetIndex,
) -> bool {
    if selection.is_collapsed() {
        return false;
    }
    let touches_annotation = index.overlaps_partially(selection.start, selection.stop)
        || index.encloses(selection.start, selection.stop);

    !touches_annotation || current.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MENU: &str = " [ nuits ]{style| color: dodger blue} : [ 150 ]{style| color: crimson} €";

    #[test]
    fn test_selection_normalizes_order() {
        let selection = Selection::new(9, 3);
        assert_eq!(selection.range(), 3..9);
        assert_eq!(selection.len(), 6);
        assert!(Selection::cursor(4).is_collapsed());
    }

    #[test]
    fn test_resolution_snaps_to_clause() {
        let index = OffsetIndex::build(MENU);
        let resolution = resolve_selection(Selection::new(20, 22), &index);

        assert_eq!(resolution.selection, Selection::new(10, 37));
        let current = resolution.current.unwrap();
        assert_eq!(current.annotation.body(), "nuits");
    }

    #[test]
    fn test_resolution_passes_plain_selection_through() {
        let index = OffsetIndex::build(MENU);
        let reported = Selection::new(3, 6);
        let resolution = resolve_selection(reported, &index);

        assert_eq!(resolution.selection, reported);
        assert!(resolution.current.is_none());
    }

    #[test]
    fn test_plain_markdown_legality() {
        let index = OffsetIndex::build(MENU);
        assert!(!can_plain_markdown_style(Selection::cursor(5), &index));
        assert!(!can_plain_markdown_style(Selection::new(5, 39), &index));
        assert!(can_plain_markdown_style(Selection::new(0, 40), &index));
        assert!(can_plain_markdown_style(Selection::new(37, 40), &index));
    }

    #[test]
    fn test_custom_style_legality() {
        let index = OffsetIndex::build(MENU);

        assert!(!can_custom_style(Selection::cursor(38), None, &index));
        assert!(can_custom_style(Selection::new(37, 40), None, &index));
        assert!(!can_custom_style(Selection::new(5, 39), None, &index));
        assert!(!can_custom_style(Selection::new(0, 40), None, &index));

        let resolution = resolve_selection(Selection::new(12, 12), &index);
        assert!(can_custom_style(
            resolution.selection,
            resolution.current.as_ref(),
            &index
        ));
    }
}
