//! # Offset Index
//!
//! Table of every annotation in the current text, keyed by its
//! [`Bounds`]. It is a derived view: rebuilt from scratch whenever the
//! text changes, never patched.

use notemark_parser::{scan_document, Annotation, Bounds};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffsetIndex {
    entries: BTreeMap<Bounds, Annotation>,
}

impl OffsetIndex {
    /// Scan `text` and record every non-plain segment with document offsets
    pub fn build(text: &str) -> Self {
        let entries = scan_document(text)
            .into_iter()
            .flatten()
            .filter_map(|segment| segment.bounds.map(|bounds| (bounds, segment.annotation)))
            .collect();

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, bounds: &Bounds) -> Option<&Annotation> {
        self.entries.get(bounds)
    }

    /// Entries in document order
    pub fn iter(&self) -> impl Iterator<Item = (&Bounds, &Annotation)> {
        self.entries.iter()
    }

    /// The annotation whose clause `[style_start, style_stop)` holds `position`
    pub fn find_enclosing(&self, position: usize) -> Option<(&Bounds, &Annotation)> {
        // Intervals never overlap, so only the last annotation starting at
        // or before `position` can contain it.
        let probe = Bounds::new(position, usize::MAX, usize::MAX, usize::MAX);
        self.entries
            .range(..=probe)
            .next_back()
            .filter(|(bounds, _)| bounds.style_start <= position && position < bounds.style_stop)
    }

    /// True when exactly one end of the selection lies strictly inside an annotation
    pub fn overlaps_partially(&self, start: usize, stop: usize) -> bool {
        self.entries.keys().any(|bounds| {
            let inside = |offset: usize| bounds.body_start < offset && offset < bounds.style_stop;
            inside(start) != inside(stop)
        })
    }

    /// True when the selection covers some whole annotation
    pub fn encloses(&self, start: usize, stop: usize) -> bool {
        self.entries
            .keys()
            .any(|bounds| start <= bounds.body_start && stop >= bounds.style_stop)
    }

    /// True when the selection sits entirely within one annotation
    pub fn is_nested_in(&self, start: usize, stop: usize) -> bool {
        self.entries
            .keys()
            .any(|bounds| bounds.body_start < start && stop < bounds.style_stop)
    }

    /// True when the selection sits within one annotation's editable body text
    pub fn is_within_body(&self, start: usize, stop: usize) -> bool {
        self.entries.keys().any(|bounds| {
            let body = bounds.inner_body();
            body.start <= start && stop <= body.end
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MENU: &str = " [ nuits ]{style| color: dodger blue} : [ 150 ]{style| color: crimson} €";

    #[test]
    fn test_build_records_every_annotation() {
        let index = OffsetIndex::build(MENU);
        assert_eq!(index.len(), 2);

        let bodies: Vec<_> = index.iter().map(|(_, a)| a.body().to_string()).collect();
        assert_eq!(bodies, vec!["nuits", "150"]);
    }

    #[test]
    fn test_build_uses_document_offsets() {
        let text = "line one\n[b]{style| color: red}";
        let index = OffsetIndex::build(text);
        let (bounds, _) = index.iter().next().unwrap();
        assert_eq!(*bounds, Bounds::new(9, 12, 12, text.len()));
    }

    #[test]
    fn test_find_enclosing_uses_clause_interval() {
        let index = OffsetIndex::build(MENU);
        // "[ nuits ]" is 1..10, "{style| color: dodger blue}" is 10..37
        assert!(index.find_enclosing(5).is_none());
        assert_eq!(index.find_enclosing(10).unwrap().0.style_start, 10);
        assert_eq!(index.find_enclosing(36).unwrap().0.style_start, 10);
        assert!(index.find_enclosing(37).is_none());
        assert!(index.find_enclosing(1000).is_none());
    }

    #[test]
    fn test_overlaps_partially() {
        let index = OffsetIndex::build(MENU);
        assert!(index.overlaps_partially(5, 40));
        assert!(index.overlaps_partially(0, 5));
        assert!(!index.overlaps_partially(1, 37));
        assert!(!index.overlaps_partially(0, 40));
        assert!(index.overlaps_partially(0, 45));
        assert!(!index.overlaps_partially(4, 8));
    }

    #[test]
    fn test_encloses() {
        let index = OffsetIndex::build(MENU);
        assert!(index.encloses(0, 37));
        assert!(index.encloses(1, 37));
        assert!(!index.encloses(2, 37));
        assert!(!index.encloses(0, 36));
    }

    #[test]
    fn test_is_nested_in() {
        let index = OffsetIndex::build(MENU);
        assert!(index.is_nested_in(3, 7));
        assert!(!index.is_nested_in(1, 7));
    }

    #[test]
    fn test_empty_text() {
        let index = OffsetIndex::build("");
        assert!(index.is_empty());
        assert!(index.find_enclosing(0).is_none());
        assert!(!index.overlaps_partially(0, 0));
    }
}
