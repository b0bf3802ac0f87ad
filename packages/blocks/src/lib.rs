//! # notemark blocks
//!
//! Render-ready view of a note:
//!
//! ```text
//! raw text ──▶ markdown::parse_blocks ──▶ splicer::splice_blocks ──▶ Vec<Block>
//!                (pulldown-cmark)           (annotation rescan,
//!                                            image promotion)
//! ```

pub mod markdown;
pub mod splicer;
pub mod tree;

pub use markdown::parse_blocks;
pub use splicer::{rescan_inlines, splice_blocks, splice_paragraph};
pub use tree::{Block, ImageDirective, Inline, MarkdownInline};

use tracing::debug;

/// Parse and splice a whole note
pub fn render(text: &str) -> Vec<Block> {
    let blocks = splice_blocks(parse_blocks(text));
    debug!(bytes = text.len(), blocks = blocks.len(), "rendered note");
    blocks
}
