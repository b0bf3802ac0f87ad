//! # Document State
//!
//! Immutable snapshot of one note being edited.
//!
//! Every host event produces a [`Transition`]: a brand-new state plus the
//! effects the host must run. The previous state is left untouched, so a
//! host can keep it around, compare, or drop it.
//!
//! ## Lifecycle
//!
//! ```text
//! text change ─┐
//! edit ────────┼─→ record history → rebuild index → resolve selection → Transition
//! undo ────────┘
//! ```

use crate::article_style::ArticleStyle;
use crate::config::EditorConfig;
use crate::edits::{Edit, EditError, EditOutcome};
use crate::effects::Effect;
use crate::history::{History, Snapshot};
use crate::index::OffsetIndex;
use crate::selection::{
    can_custom_style, can_plain_markdown_style, resolve_selection, CurrentAnnotation, Selection,
};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct DocumentState {
    text: String,

    /// Effective selection, after snapping
    selection: Selection,

    current: Option<CurrentAnnotation>,
    index: OffsetIndex,
    article_style: ArticleStyle,
    history: History,

    /// Increments on every text or article style change
    version: u64,
}

/// Result of handling one event
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: DocumentState,
    pub effects: Vec<Effect>,
}

impl DocumentState {
    pub fn new(text: impl Into<String>, config: &EditorConfig) -> Self {
        let text = text.into();
        let index = OffsetIndex::build(&text);

        Self {
            text,
            selection: Selection::default(),
            current: None,
            index,
            article_style: config.article_style.clone(),
            history: History::with_max_levels(config.undo_depth),
            version: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn current(&self) -> Option<&CurrentAnnotation> {
        self.current.as_ref()
    }

    pub fn index(&self) -> &OffsetIndex {
        &self.index
    }

    pub fn article_style(&self) -> &ArticleStyle {
        &self.article_style
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// The host widget's text changed
    pub fn text_changed(&self, text: impl Into<String>, selection: Selection) -> Transition {
        let text = text.into();
        let mut history = self.history.clone();
        if text != self.text {
            history.push(self.text_snapshot());
        }
        self.with_text(text, selection, history)
    }

    /// The host widget's selection changed
    pub fn selection_changed(&self, reported: Selection) -> Transition {
        let selection = self.clamp(reported);
        let resolution = resolve_selection(selection, &self.index);

        let mut effects = Vec::new();
        if resolution.selection != reported {
            effects.push(set_selection(resolution.selection));
        }

        Transition {
            state: Self {
                selection: resolution.selection,
                current: resolution.current,
                ..self.clone()
            },
            effects,
        }
    }

    /// Run an edit against the effective selection
    pub fn apply(&self, edit: &Edit) -> Result<Transition, EditError> {
        let outcome = edit
            .apply(&self.text, self.selection, &self.index)
            .map_err(|error| {
                warn!(edit = edit.name(), %error, "edit rejected");
                error
            })?;

        match outcome {
            EditOutcome::Rewrite { text, selection } => {
                let mut history = self.history.clone();
                if text != self.text {
                    history.push(self.text_snapshot());
                }

                let mut transition = self.with_text(text, selection, history);
                transition.effects = vec![set_selection(transition.state.selection)];
                Ok(transition)
            }
            EditOutcome::ArticleStyle { attributes } => {
                let mut history = self.history.clone();
                history.push(Snapshot::ArticleStyle {
                    style: self.article_style.clone(),
                });

                let article_style = self.article_style.merge(&attributes);
                debug!(?article_style, "article style updated");

                Ok(Transition {
                    state: Self {
                        article_style,
                        history,
                        version: self.version + 1,
                        ..self.clone()
                    },
                    effects: Vec::new(),
                })
            }
        }
    }

    /// Restore the most recent snapshot, or `None` when history is empty
    pub fn undo(&self) -> Option<Transition> {
        let mut history = self.history.clone();
        let snapshot = history.pop()?;
        debug!(remaining = history.undo_levels(), "undo");

        Some(match snapshot {
            Snapshot::Text { text, selection } => {
                let mut transition = self.with_text(text, selection, history);
                transition.effects = vec![set_selection(transition.state.selection)];
                transition
            }
            Snapshot::ArticleStyle { style } => Transition {
                state: Self {
                    article_style: style,
                    history,
                    version: self.version + 1,
                    ..self.clone()
                },
                effects: Vec::new(),
            },
        })
    }

    pub fn can_plain_markdown_style(&self) -> bool {
        can_plain_markdown_style(self.selection, &self.index)
    }

    pub fn can_custom_style(&self) -> bool {
        can_custom_style(self.selection, self.current.as_ref(), &self.index)
    }

    fn text_snapshot(&self) -> Snapshot {
        Snapshot::Text {
            text: self.text.clone(),
            selection: self.selection,
        }
    }

    /// Shared text-change path: rebuild the index, then resolve
    fn with_text(&self, text: String, reported: Selection, history: History) -> Transition {
        let index = OffsetIndex::build(&text);
        debug!(
            version = self.version + 1,
            annotations = index.len(),
            "index rebuilt"
        );

        let state = Self {
            text,
            selection: Selection::default(),
            current: None,
            index,
            article_style: self.article_style.clone(),
            history,
            version: self.version + 1,
        };
        state.selection_changed(reported)
    }

    /// Keep a reported selection inside the text and on char boundaries
    fn clamp(&self, selection: Selection) -> Selection {
        let fit = |mut offset: usize| {
            offset = offset.min(self.text.len());
            while !self.text.is_char_boundary(offset) {
                offset -= 1;
            }
            offset
        };
        Selection::new(fit(selection.start), fit(selection.stop))
    }
}

fn set_selection(selection: Selection) -> Effect {
    Effect::SetSelection {
        start: selection.start,
        stop: selection.stop,
    }
}
