//! # Edits
//!
//! Operations a note editor performs on raw annotated text.
//!
//! Every edit is a function of `(text, selection, index)` returning the new
//! text and the selection to show afterwards. Nothing is mutated in place;
//! the caller rebuilds the [`OffsetIndex`] on the new text before the next
//! edit.
//!
//! ## Edit Semantics
//!
//! ### Insert
//! - Wraps the selected text in a new style annotation
//! - Whitespace at the selection edges stays outside the brackets
//! - A collapsed selection has nothing to wrap: the attributes go to the
//!   document-wide article style instead
//!
//! ### Update
//! - Rewrites only the `{style| ...}` clause of an existing annotation
//! - New attributes win per category; untouched categories survive
//!
//! ### Remove
//! - Replaces the whole annotation with its body text
//!
//! ### Markdown
//! - Bold, italic and heading markers around the selection
//!
//! Edits refuse (with an [`EditError`]) any input that would produce
//! text whose annotations no longer parse back to what was intended.

use crate::index::OffsetIndex;
use crate::selection::Selection;
use crate::structural::{markdown_replacement, MarkdownStyle};
use notemark_parser::{
    image_clause, style_clause, Alignment, Annotation, AttributeCategory, Bounds, Scanner,
    StyleAttribute,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::Range;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Edit {
    /// Wrap the selection in a style annotation
    Insert { attributes: Vec<StyleAttribute> },

    /// Turn the selection into an image directive's description
    InsertImage { source: String, alignment: Alignment },

    /// Merge attributes into an existing style annotation
    Update {
        bounds: Bounds,
        attributes: Vec<StyleAttribute>,
    },

    /// Strip an annotation back to its body text
    Remove { bounds: Bounds },

    Markdown { style: MarkdownStyle },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// New raw text and the selection to push back to the host
    Rewrite { text: String, selection: Selection },

    /// Collapsed-selection insert: attributes for the article style
    ArticleStyle { attributes: Vec<StyleAttribute> },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Selection {start}..{stop} is out of range or splits a character")]
    InvalidSelection { start: usize, stop: usize },

    #[error("Selection is empty")]
    EmptySelection,

    #[error("No attributes given")]
    EmptyAttributes,

    #[error("Attribute cannot be written as annotation syntax: {0}")]
    InvalidAttribute(String),

    #[error("Selected text cannot be wrapped: {0}")]
    UnwrappableSelection(&'static str),

    #[error("Selection lies inside an existing annotation")]
    NestedAnnotation,

    #[error("Selection cuts through annotation syntax")]
    PartialOverlap,

    #[error("No annotation at {0:?}")]
    AnnotationNotFound(Bounds),

    #[error("Annotation is an image, not a style")]
    NotStyled,

    #[error("Heading level must be between 1 and 6, got {0}")]
    InvalidHeadingLevel(u8),
}

impl Edit {
    pub fn name(&self) -> &'static str {
        match self {
            Edit::Insert { .. } => "insert",
            Edit::InsertImage { .. } => "insert image",
            Edit::Update { .. } => "update",
            Edit::Remove { .. } => "remove",
            Edit::Markdown { .. } => "markdown",
        }
    }

    /// Apply the edit to `text`; `index` must be built from `text`
    pub fn apply(
        &self,
        text: &str,
        selection: Selection,
        index: &OffsetIndex,
    ) -> Result<EditOutcome, EditError> {
        check_range(text, selection.range())?;

        let outcome = match self {
            Edit::Insert { attributes } => Self::apply_insert(text, selection, index, attributes),
            Edit::InsertImage { source, alignment } => {
                Self::apply_insert_image(text, selection, index, source, *alignment)
            }
            Edit::Update { bounds, attributes } => {
                Self::apply_update(text, index, bounds, attributes)
            }
            Edit::Remove { bounds } => Self::apply_remove(text, index, bounds),
            Edit::Markdown { style } => Self::apply_markdown(text, selection, index, *style),
        }?;

        debug!(edit = self.name(), ?outcome, "edit applied");
        Ok(outcome)
    }

    fn apply_insert(
        text: &str,
        selection: Selection,
        index: &OffsetIndex,
        attributes: &[StyleAttribute],
    ) -> Result<EditOutcome, EditError> {
        let attributes = normalize_attributes(attributes)?;

        if selection.is_collapsed() {
            return Ok(EditOutcome::ArticleStyle { attributes });
        }

        let clause = style_clause(&combine_attributes(&attributes, &[]));
        wrap_selection(text, selection, index, &clause)
    }

    fn apply_insert_image(
        text: &str,
        selection: Selection,
        index: &OffsetIndex,
        source: &str,
        alignment: Alignment,
    ) -> Result<EditOutcome, EditError> {
        if selection.is_collapsed() {
            return Err(EditError::EmptySelection);
        }
        let source = normalize_value("src", source)?;
        wrap_selection(text, selection, index, &image_clause(source, alignment))
    }

    fn apply_update(
        text: &str,
        index: &OffsetIndex,
        bounds: &Bounds,
        attributes: &[StyleAttribute],
    ) -> Result<EditOutcome, EditError> {
        let existing = match index.get(bounds) {
            Some(Annotation::Styled { attributes, .. }) => attributes,
            Some(_) => return Err(EditError::NotStyled),
            None => return Err(EditError::AnnotationNotFound(*bounds)),
        };
        check_range(text, bounds.whole())?;

        let attributes = normalize_attributes(attributes)?;
        let clause = style_clause(&combine_attributes(&attributes, existing));

        let mut new_text = String::with_capacity(text.len() + clause.len());
        new_text.push_str(&text[..bounds.style_start]);
        new_text.push_str(&clause);
        new_text.push_str(&text[bounds.style_stop..]);

        Ok(EditOutcome::Rewrite {
            text: new_text,
            selection: Selection::new(bounds.style_start, bounds.style_start + clause.len()),
        })
    }

    fn apply_remove(
        text: &str,
        index: &OffsetIndex,
        bounds: &Bounds,
    ) -> Result<EditOutcome, EditError> {
        let annotation = index
            .get(bounds)
            .ok_or(EditError::AnnotationNotFound(*bounds))?;
        check_range(text, bounds.whole())?;

        let body = annotation.body();
        let mut new_text = String::with_capacity(text.len());
        new_text.push_str(&text[..bounds.body_start]);
        new_text.push_str(body);
        new_text.push_str(&text[bounds.style_stop..]);

        Ok(EditOutcome::Rewrite {
            text: new_text,
            selection: Selection::cursor(bounds.body_start + body.len()),
        })
    }

    fn apply_markdown(
        text: &str,
        selection: Selection,
        index: &OffsetIndex,
        style: MarkdownStyle,
    ) -> Result<EditOutcome, EditError> {
        if let MarkdownStyle::Heading(level) = style {
            if !style.is_valid() {
                return Err(EditError::InvalidHeadingLevel(level));
            }
        }
        if selection.is_collapsed() {
            return Err(EditError::EmptySelection);
        }
        if index.overlaps_partially(selection.start, selection.stop) {
            return Err(EditError::PartialOverlap);
        }
        // Markers may only land in an annotation's body text, and a heading
        // would split the annotation across lines.
        if index.is_nested_in(selection.start, selection.stop)
            && (matches!(style, MarkdownStyle::Heading(_))
                || !index.is_within_body(selection.start, selection.stop))
        {
            return Err(EditError::NestedAnnotation);
        }

        let Some(replacement) = markdown_replacement(text, selection, style) else {
            return Ok(EditOutcome::Rewrite {
                text: text.to_string(),
                selection,
            });
        };

        let new_text = splice(text, selection.range(), &replacement);
        if OffsetIndex::build(&new_text).len() != index.len() {
            return Err(EditError::UnwrappableSelection(
                "markdown markers change how annotations parse",
            ));
        }

        Ok(EditOutcome::Rewrite {
            text: new_text,
            selection: Selection::new(selection.start, selection.start + replacement.len()),
        })
    }
}

/// New attributes first, then existing ones; the first per category wins
pub fn combine_attributes(
    new: &[StyleAttribute],
    existing: &[StyleAttribute],
) -> Vec<StyleAttribute> {
    let mut seen: HashSet<AttributeCategory> = HashSet::new();
    new.iter()
        .chain(existing)
        .filter(|attribute| seen.insert(attribute.category()))
        .cloned()
        .collect()
}

/// `[selection]clause` in place of the selection, with edge whitespace
/// kept outside the brackets.
///
/// The returned selection is the new annotation's clause
/// `[style_start, style_stop)`, not its body. That is the range a cursor
/// inside the annotation snaps to, so the host selection lands already
/// snapped and the next edit can target the annotation directly.
fn wrap_selection(
    text: &str,
    selection: Selection,
    index: &OffsetIndex,
    clause: &str,
) -> Result<EditOutcome, EditError> {
    if index.overlaps_partially(selection.start, selection.stop) {
        return Err(EditError::PartialOverlap);
    }
    if index.is_nested_in(selection.start, selection.stop) {
        return Err(EditError::NestedAnnotation);
    }

    let selected = &text[selection.range()];
    if selected.contains('\n') {
        return Err(EditError::UnwrappableSelection("text spans several lines"));
    }
    if selected.contains(']') {
        return Err(EditError::UnwrappableSelection("text contains `]`"));
    }
    let body = selected.trim();
    if body.is_empty() {
        return Err(EditError::UnwrappableSelection("text is blank"));
    }

    let leading = selected.len() - selected.trim_start().len();
    let start = selection.start + leading;
    let stop = start + body.len();
    let replacement = format!("[{}]{}", body, clause);

    let bounds = Bounds::new(
        start,
        start + body.len() + 2,
        start + body.len() + 2,
        start + replacement.len(),
    );
    let new_text = splice(text, start..stop, &replacement);

    // An unclosed `[` earlier on the line would swallow the new body.
    if !scans_as_annotation(&new_text, bounds) {
        return Err(EditError::UnwrappableSelection(
            "surrounding brackets change how it parses",
        ));
    }

    Ok(EditOutcome::Rewrite {
        text: new_text,
        selection: Selection::from(bounds.clause()),
    })
}

fn scans_as_annotation(text: &str, bounds: Bounds) -> bool {
    let line_start = text[..bounds.body_start].rfind('\n').map_or(0, |i| i + 1);
    let line_stop = text[bounds.body_start..]
        .find('\n')
        .map_or(text.len(), |i| bounds.body_start + i);

    Scanner::new(text, line_start..line_stop)
        .scan()
        .iter()
        .any(|segment| segment.bounds == Some(bounds))
}

fn splice(text: &str, range: Range<usize>, replacement: &str) -> String {
    let mut output = String::with_capacity(text.len() + replacement.len());
    output.push_str(&text[..range.start]);
    output.push_str(replacement);
    output.push_str(&text[range.end..]);
    output
}

fn check_range(text: &str, range: Range<usize>) -> Result<(), EditError> {
    if range.start > range.end
        || range.end > text.len()
        || !text.is_char_boundary(range.start)
        || !text.is_char_boundary(range.end)
    {
        return Err(EditError::InvalidSelection {
            start: range.start,
            stop: range.end,
        });
    }
    Ok(())
}

/// Trimmed attribute values that survive a write-then-parse
fn normalize_attributes(attributes: &[StyleAttribute]) -> Result<Vec<StyleAttribute>, EditError> {
    if attributes.is_empty() {
        return Err(EditError::EmptyAttributes);
    }

    attributes
        .iter()
        .map(|attribute| {
            let keyword = attribute.category().keyword();
            Ok(match attribute {
                StyleAttribute::Font(name) => {
                    StyleAttribute::Font(normalize_value(keyword, name)?.to_string())
                }
                StyleAttribute::FontSize(0) => {
                    return Err(EditError::InvalidAttribute("size must be positive".to_string()))
                }
                StyleAttribute::FontSize(size) => StyleAttribute::FontSize(*size),
                StyleAttribute::Color(key) => {
                    StyleAttribute::Color(normalize_value(keyword, key)?.to_string())
                }
                StyleAttribute::BackgroundColor(key) => {
                    StyleAttribute::BackgroundColor(normalize_value(keyword, key)?.to_string())
                }
            })
        })
        .collect()
}

fn normalize_value<'a>(keyword: &str, value: &'a str) -> Result<&'a str, EditError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(EditError::InvalidAttribute(format!("{} is empty", keyword)));
    }
    if value.contains([',', '}', '\n']) {
        return Err(EditError::InvalidAttribute(format!(
            "{} value {:?} contains `,`, `}}` or a line break",
            keyword, value
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MENU: &str = " [ nuits ]{style| color: dodger blue} : [ 150 ]{style| color: crimson} €";

    fn rewrite(outcome: EditOutcome) -> (String, Selection) {
        match outcome {
            EditOutcome::Rewrite { text, selection } => (text, selection),
            other => panic!("Expected rewrite, got {:?}", other),
        }
    }

    fn bounds_of(index: &OffsetIndex, body: &str) -> Bounds {
        index
            .iter()
            .find(|(_, annotation)| annotation.body() == body)
            .map(|(bounds, _)| *bounds)
            .unwrap()
    }

    #[test]
    fn test_update_merges_new_category_first() {
        let index = OffsetIndex::build(MENU);
        let bounds = bounds_of(&index, "nuits");
        let edit = Edit::Update {
            bounds,
            attributes: vec![StyleAttribute::FontSize(24)],
        };

        let (text, selection) = rewrite(edit.apply(MENU, Selection::from(bounds.clause()), &index).unwrap());
        assert!(text.starts_with(" [ nuits ]{style| size: 24, color: dodger blue} : "));
        assert_eq!(&text[selection.range()], "{style| size: 24, color: dodger blue}");
    }

    #[test]
    fn test_update_replaces_same_category() {
        let text = "[a]{style| font: serif, color: red}";
        let index = OffsetIndex::build(text);
        let bounds = bounds_of(&index, "a");
        let edit = Edit::Update {
            bounds,
            attributes: vec![StyleAttribute::Color("blue".to_string())],
        };

        let (text, _) = rewrite(edit.apply(text, Selection::cursor(3), &index).unwrap());
        assert_eq!(text, "[a]{style| color: blue, font: serif}");
    }

    #[test]
    fn test_update_rejects_images_and_unknown_bounds() {
        let text = "[logo]{image| src: logo.png}";
        let index = OffsetIndex::build(text);
        let bounds = bounds_of(&index, "logo");
        let attributes = vec![StyleAttribute::FontSize(12)];

        let edit = Edit::Update {
            bounds,
            attributes: attributes.clone(),
        };
        assert_eq!(edit.apply(text, Selection::cursor(0), &index), Err(EditError::NotStyled));

        let missing = Bounds::new(0, 1, 1, 2);
        let edit = Edit::Update {
            bounds: missing,
            attributes,
        };
        assert_eq!(
            edit.apply(text, Selection::cursor(0), &index),
            Err(EditError::AnnotationNotFound(missing))
        );
    }

    #[test]
    fn test_remove_restores_trimmed_body() {
        let index = OffsetIndex::build(MENU);
        let bounds = bounds_of(&index, "150");
        let (text, selection) = rewrite(
            Edit::Remove { bounds }
                .apply(MENU, Selection::cursor(bounds.style_start), &index)
                .unwrap(),
        );

        assert_eq!(text, " [ nuits ]{style| color: dodger blue} : 150 €");
        assert_eq!(&text[..selection.start], " [ nuits ]{style| color: dodger blue} : 150");
        assert!(selection.is_collapsed());
    }

    #[test]
    fn test_insert_wraps_selection() {
        let text = "3 nuits : 0 €";
        let index = OffsetIndex::build(text);
        let edit = Edit::Insert {
            attributes: vec![StyleAttribute::Color("red".to_string())],
        };

        let (text, selection) = rewrite(edit.apply(text, Selection::new(10, text.len()), &index).unwrap());
        assert_eq!(text, "3 nuits : [0 €]{style| color: red}");
        assert_eq!(&text[selection.range()], "{style| color: red}");
    }

    #[test]
    fn test_insert_keeps_edge_whitespace_outside() {
        let text = "a word b";
        let index = OffsetIndex::build(text);
        let edit = Edit::Insert {
            attributes: vec![StyleAttribute::Font("serif".to_string())],
        };

        let (text, _) = rewrite(edit.apply(text, Selection::new(1, 7), &index).unwrap());
        assert_eq!(text, "a [word]{style| font: serif} b");
    }

    #[test]
    fn test_insert_deduplicates_categories() {
        let edit = Edit::Insert {
            attributes: vec![
                StyleAttribute::Color("red".to_string()),
                StyleAttribute::Color("blue".to_string()),
            ],
        };
        let (text, _) = rewrite(edit.apply("x", Selection::new(0, 1), &OffsetIndex::default()).unwrap());
        assert_eq!(text, "[x]{style| color: red}");
    }

    #[test]
    fn test_collapsed_insert_targets_article_style() {
        let edit = Edit::Insert {
            attributes: vec![StyleAttribute::FontSize(18)],
        };
        assert_eq!(
            edit.apply("text", Selection::cursor(2), &OffsetIndex::default()),
            Ok(EditOutcome::ArticleStyle {
                attributes: vec![StyleAttribute::FontSize(18)]
            })
        );
    }

    #[test]
    fn test_insert_guards() {
        let index = OffsetIndex::build(MENU);
        let insert = Edit::Insert {
            attributes: vec![StyleAttribute::Color("red".to_string())],
        };

        assert_eq!(
            insert.apply(MENU, Selection::new(3, 7), &index),
            Err(EditError::NestedAnnotation)
        );
        assert_eq!(
            insert.apply(MENU, Selection::new(5, 39), &index),
            Err(EditError::PartialOverlap)
        );
        assert!(matches!(
            insert.apply(MENU, Selection::new(0, 40), &index),
            Err(EditError::UnwrappableSelection(_))
        ));
        assert!(matches!(
            insert.apply(MENU, Selection::new(0, 500), &index),
            Err(EditError::InvalidSelection { .. })
        ));

        let empty = Edit::Insert { attributes: vec![] };
        assert_eq!(
            empty.apply(MENU, Selection::new(37, 40), &index),
            Err(EditError::EmptyAttributes)
        );

        let bad = Edit::Insert {
            attributes: vec![StyleAttribute::Font("a, b".to_string())],
        };
        assert!(matches!(
            bad.apply(MENU, Selection::new(37, 40), &index),
            Err(EditError::InvalidAttribute(_))
        ));
    }

    #[test]
    fn test_insert_refuses_to_be_swallowed_by_open_bracket() {
        let text = "[note words";
        let index = OffsetIndex::build(text);
        let edit = Edit::Insert {
            attributes: vec![StyleAttribute::Color("red".to_string())],
        };
        assert!(matches!(
            edit.apply(text, Selection::new(6, 11), &index),
            Err(EditError::UnwrappableSelection(_))
        ));
    }

    #[test]
    fn test_insert_image() {
        let text = "see elm logo here";
        let edit = Edit::InsertImage {
            source: " https://elm-lang.org/logo.svg ".to_string(),
            alignment: Alignment::Left,
        };

        let (text, selection) = rewrite(
            edit.apply(text, Selection::new(4, 12), &OffsetIndex::default())
                .unwrap(),
        );
        assert_eq!(
            text,
            "see [elm logo]{image| src: https://elm-lang.org/logo.svg, align: left} here"
        );
        assert_eq!(selection.start, 14);

        assert_eq!(
            edit.apply("x", Selection::cursor(0), &OffsetIndex::default()),
            Err(EditError::EmptySelection)
        );
    }

    #[test]
    fn test_markdown_bold_and_heading() {
        let text = "menu of the day";
        let index = OffsetIndex::build(text);

        let bold = Edit::Markdown {
            style: MarkdownStyle::Bold,
        };
        let (bolded, selection) = rewrite(bold.apply(text, Selection::new(4, 8), &index).unwrap());
        assert_eq!(bolded, "menu **of** the day");
        assert_eq!(&bolded[selection.range()], " **of** ");

        let heading = Edit::Markdown {
            style: MarkdownStyle::Heading(2),
        };
        let (headed, _) = rewrite(heading.apply(text, Selection::new(0, 15), &index).unwrap());
        assert_eq!(headed, "## menu of the day");
    }

    #[test]
    fn test_markdown_guards() {
        let index = OffsetIndex::build(MENU);
        let bold = Edit::Markdown {
            style: MarkdownStyle::Bold,
        };
        assert_eq!(
            bold.apply(MENU, Selection::new(5, 39), &index),
            Err(EditError::PartialOverlap)
        );
        assert_eq!(
            bold.apply(MENU, Selection::cursor(5), &index),
            Err(EditError::EmptySelection)
        );

        let heading = Edit::Markdown {
            style: MarkdownStyle::Heading(9),
        };
        assert_eq!(
            heading.apply(MENU, Selection::new(37, 40), &index),
            Err(EditError::InvalidHeadingLevel(9))
        );
    }

    #[test]
    fn test_markdown_inside_annotation_body() {
        let text = "say [ nuits ]{style| color: red} ok";
        let index = OffsetIndex::build(text);

        let bold = Edit::Markdown {
            style: MarkdownStyle::Bold,
        };
        let (bolded, _) = rewrite(bold.apply(text, Selection::new(6, 11), &index).unwrap());
        assert_eq!(bolded, "say [ **nuits** ]{style| color: red} ok");
        assert_eq!(OffsetIndex::build(&bolded).len(), 1);

        let heading = Edit::Markdown {
            style: MarkdownStyle::Heading(1),
        };
        assert_eq!(
            heading.apply(text, Selection::new(6, 11), &index),
            Err(EditError::NestedAnnotation)
        );
    }

    #[test]
    fn test_markdown_refuses_clause_text() {
        let text = "[a]{style| color: red}";
        let index = OffsetIndex::build(text);

        for style in [MarkdownStyle::Bold, MarkdownStyle::Italic] {
            assert_eq!(
                Edit::Markdown { style }.apply(text, Selection::new(11, 16), &index),
                Err(EditError::NestedAnnotation)
            );
        }
    }

    #[test]
    fn test_markdown_heading_around_whole_annotation() {
        let text = "menu [a]{style| color: red} end";
        let index = OffsetIndex::build(text);
        let heading = Edit::Markdown {
            style: MarkdownStyle::Heading(2),
        };

        let (headed, _) = rewrite(heading.apply(text, Selection::new(5, 27), &index).unwrap());
        assert_eq!(OffsetIndex::build(&headed).len(), 1);
    }

    #[test]
    fn test_markdown_blank_selection_is_a_no_op() {
        let text = "a   b";
        let bold = Edit::Markdown {
            style: MarkdownStyle::Italic,
        };
        let (after, selection) = rewrite(
            bold.apply(text, Selection::new(1, 4), &OffsetIndex::default())
                .unwrap(),
        );
        assert_eq!(after, text);
        assert_eq!(selection, Selection::new(1, 4));
    }

    #[test]
    fn test_combine_attributes() {
        let combined = combine_attributes(
            &[
                StyleAttribute::Color("blue".to_string()),
                StyleAttribute::FontSize(12),
            ],
            &[
                StyleAttribute::Font("serif".to_string()),
                StyleAttribute::Color("red".to_string()),
                StyleAttribute::FontSize(30),
            ],
        );
        assert_eq!(
            combined,
            vec![
                StyleAttribute::Color("blue".to_string()),
                StyleAttribute::FontSize(12),
                StyleAttribute::Font("serif".to_string()),
            ]
        );
    }
}
