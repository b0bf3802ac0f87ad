//! Plain markdown wrapping for bold, italic and headings.
//!
//! Markers go around the trimmed selection; the selection's own leading
//! and trailing whitespace is put back outside them, so `" word "`
//! becomes `" **word** "` rather than `"** word **"`.

use crate::selection::Selection;
use notemark_parser::line_spans;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkdownStyle {
    Bold,
    Italic,
    /// ATX heading, level 1 to 6
    Heading(u8),
}

impl MarkdownStyle {
    pub fn is_valid(&self) -> bool {
        match self {
            MarkdownStyle::Heading(level) => (1..=6).contains(level),
            _ => true,
        }
    }

    fn wrap(&self, core: &str) -> String {
        match self {
            MarkdownStyle::Bold => format!("**{}**", core),
            MarkdownStyle::Italic => format!("*{}*", core),
            MarkdownStyle::Heading(level) => {
                format!("{} {}", "#".repeat(usize::from(*level)), core)
            }
        }
    }
}

/// Where a heading selection sits relative to its line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinePlacement {
    WholeLine,
    LineStart,
    MidLine,
}

pub fn classify_line_placement(text: &str, selection: Selection) -> LinePlacement {
    let spans = line_spans(text);
    if spans.iter().any(|line| *line == selection.range()) {
        LinePlacement::WholeLine
    } else if spans.iter().any(|line| line.start == selection.start) {
        LinePlacement::LineStart
    } else {
        LinePlacement::MidLine
    }
}

/// Replacement text for `selection`, or `None` when it is all whitespace
pub fn markdown_replacement(text: &str, selection: Selection, style: MarkdownStyle) -> Option<String> {
    let selected = &text[selection.range()];
    let core = selected.trim();
    if core.is_empty() {
        return None;
    }

    let leading = &selected[..selected.len() - selected.trim_start().len()];
    let trailing = &selected[selected.trim_end().len()..];
    let wrapped = format!("{}{}{}", leading, style.wrap(core), trailing);

    let replacement = match style {
        MarkdownStyle::Heading(_) => match classify_line_placement(text, selection) {
            LinePlacement::WholeLine => wrapped,
            LinePlacement::LineStart => format!("{}\n", wrapped),
            LinePlacement::MidLine => format!("\n{}\n", wrapped),
        },
        _ => wrapped,
    };

    Some(replacement)
}
