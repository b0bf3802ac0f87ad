//! # notemark editor
//!
//! Editing engine for annotated notes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ parser: line → segments (plain / annotation)│
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: snapshots + edits                   │
//! │  - Offset index rebuilt on every change     │
//! │  - Selection snapping to annotation clauses │
//! │  - Insert / update / remove / markdown      │
//! │  - Bounded undo, frame-deferred effects     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ blocks: markdown tree with spliced inlines  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Raw text is the source of truth**: the index and the rendered
//!    blocks are derived views, rebuilt, never patched
//! 2. **Snapshots, not mutation**: every event returns a new state
//! 3. **Effects are values**: the host decides when to run them
//!
//! ## Usage
//!
//! ```rust,ignore
//! use notemark_editor::{Edit, EditSession, EditorConfig, Selection};
//! use notemark_parser::StyleAttribute;
//!
//! let mut session = EditSession::new("3 nuits : 0 €", &EditorConfig::default());
//! session.selection_changed(Selection::new(10, 15));
//! session.apply(&Edit::Insert {
//!     attributes: vec![StyleAttribute::Color("red".to_string())],
//! })?;
//!
//! // One frame later the host moves its widget selection.
//! for effect in session.next_frame() {
//!     host.apply(effect);
//! }
//! ```

mod article_style;
mod config;
mod document;
mod edits;
mod effects;
mod errors;
mod history;
mod index;
mod selection;
mod session;
mod structural;

pub use article_style::ArticleStyle;
pub use config::EditorConfig;
pub use document::{DocumentState, Transition};
pub use edits::{combine_attributes, Edit, EditError, EditOutcome};
pub use effects::{Effect, EffectQueue};
pub use errors::EditorError;
pub use history::{History, Snapshot, DEFAULT_UNDO_DEPTH};
pub use index::OffsetIndex;
pub use selection::{
    can_custom_style, can_plain_markdown_style, resolve_selection, CurrentAnnotation, Resolution,
    Selection,
};
pub use session::EditSession;
pub use structural::{classify_line_placement, markdown_replacement, LinePlacement, MarkdownStyle};
