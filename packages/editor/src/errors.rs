//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Edit error: {0}")]
    Edit(#[from] crate::edits::EditError),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Nothing to undo")]
    NothingToUndo,
}
