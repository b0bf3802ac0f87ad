//! # Edit Session
//!
//! Host-facing wrapper around [`DocumentState`].
//!
//! A session owns the current snapshot and the frame-stamped effect queue.
//! The host forwards widget events to it, calls [`EditSession::next_frame`]
//! once per rendering frame, and applies whatever effects come back.

use crate::config::EditorConfig;
use crate::document::{DocumentState, Transition};
use crate::edits::Edit;
use crate::effects::{Effect, EffectQueue};
use crate::selection::Selection;
use crate::EditorError;
use notemark_blocks::Block;

#[derive(Debug, Clone)]
pub struct EditSession {
    state: DocumentState,
    effects: EffectQueue,
}

impl EditSession {
    pub fn new(text: impl Into<String>, config: &EditorConfig) -> Self {
        Self {
            state: DocumentState::new(text, config),
            effects: EffectQueue::new(),
        }
    }

    pub fn state(&self) -> &DocumentState {
        &self.state
    }

    pub fn text(&self) -> &str {
        self.state.text()
    }

    pub fn selection(&self) -> Selection {
        self.state.selection()
    }

    pub fn text_changed(&mut self, text: impl Into<String>, selection: Selection) {
        let transition = self.state.text_changed(text, selection);
        self.commit(transition);
    }

    pub fn selection_changed(&mut self, selection: Selection) {
        let transition = self.state.selection_changed(selection);
        self.commit(transition);
    }

    /// Apply an edit; on error the session is unchanged
    pub fn apply(&mut self, edit: &Edit) -> Result<(), EditorError> {
        let transition = self.state.apply(edit)?;
        self.commit(transition);
        Ok(())
    }

    pub fn undo(&mut self) -> Result<(), EditorError> {
        let transition = self.state.undo().ok_or(EditorError::NothingToUndo)?;
        self.commit(transition);
        Ok(())
    }

    /// Advance one rendering frame, returning effects now due
    pub fn next_frame(&mut self) -> Vec<Effect> {
        self.effects.advance_frame()
    }

    pub fn pending_effects(&self) -> usize {
        self.effects.pending()
    }

    pub fn can_plain_markdown_style(&self) -> bool {
        self.state.can_plain_markdown_style()
    }

    pub fn can_custom_style(&self) -> bool {
        self.state.can_custom_style()
    }

    pub fn render(&self) -> Vec<Block> {
        notemark_blocks::render(self.state.text())
    }

    fn commit(&mut self, transition: Transition) {
        self.effects.defer(transition.effects);
        self.state = transition.state;
    }
}
