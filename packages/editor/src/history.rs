//! # Undo History
//!
//! Bounded stack of prior document snapshots.
//!
//! ## Design
//!
//! - Every accepted edit records what it is about to replace: the raw text
//!   (with its selection) or the article style
//! - Undo pops the most recent snapshot and the caller replays it through
//!   the normal text-change path
//! - Pushing past the depth drops the oldest snapshot
//! - There is no redo

use crate::article_style::ArticleStyle;
use crate::selection::Selection;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const DEFAULT_UNDO_DEPTH: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Snapshot {
    Text { text: String, selection: Selection },
    ArticleStyle { style: ArticleStyle },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    /// Most recent last
    snapshots: VecDeque<Snapshot>,

    /// Maximum number of snapshots kept (0 disables history)
    max_levels: usize,
}

impl History {
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_UNDO_DEPTH)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(max_levels),
            max_levels,
        }
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        if self.max_levels == 0 {
            return;
        }
        self.snapshots.push_back(snapshot);

        while self.snapshots.len() > self.max_levels {
            self.snapshots.pop_front();
        }
    }

    /// Take the most recent snapshot
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.snapshots.pop_back()
    }

    pub fn peek(&self) -> Option<&Snapshot> {
        self.snapshots.back()
    }

    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.snapshots.len()
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(content: &str) -> Snapshot {
        Snapshot::Text {
            text: content.to_string(),
            selection: Selection::cursor(0),
        }
    }

    #[test]
    fn test_history_creation() {
        let history = History::new();
        assert_eq!(history.undo_levels(), 0);
        assert_eq!(history.max_levels(), DEFAULT_UNDO_DEPTH);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_push_and_pop_in_reverse_order() {
        let mut history = History::new();
        history.push(text("one"));
        history.push(Snapshot::ArticleStyle {
            style: ArticleStyle::default(),
        });
        history.push(text("two"));

        assert_eq!(history.pop(), Some(text("two")));
        assert!(matches!(history.pop(), Some(Snapshot::ArticleStyle { .. })));
        assert_eq!(history.pop(), Some(text("one")));
        assert_eq!(history.pop(), None);
    }

    #[test]
    fn test_depth_drops_oldest() {
        let mut history = History::with_max_levels(5);
        for i in 0..8 {
            history.push(text(&i.to_string()));
        }

        assert_eq!(history.undo_levels(), 5);
        assert_eq!(history.peek(), Some(&text("7")));

        let mut remaining = Vec::new();
        while let Some(Snapshot::Text { text, .. }) = history.pop() {
            remaining.push(text);
        }
        assert_eq!(remaining, vec!["7", "6", "5", "4", "3"]);
    }

    #[test]
    fn test_zero_depth_keeps_nothing() {
        let mut history = History::with_max_levels(0);
        history.push(text("lost"));
        assert!(!history.can_undo());
    }
}
