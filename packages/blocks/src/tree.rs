//! Render-ready block/inline tree
//!
//! Two node kinds belong to notemark itself: styled runs (inline-worthy)
//! and image directives (block-worthy). Everything else is passed through
//! from the markdown parser untouched.

use notemark_parser::{Alignment, StyleAttribute};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDirective {
    pub description: String,
    pub source: String,
    pub alignment: Alignment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Block {
    Paragraph(Vec<Inline>),
    Heading { level: u8, children: Vec<Inline> },
    /// Image promoted out of paragraph flow
    Image(ImageDirective),
    BlockQuote(Vec<Block>),
    List {
        start: Option<u64>,
        items: Vec<Vec<Block>>,
    },
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    Html(String),
    ThematicBreak,
}

impl Block {
    /// Displayable text, children concatenated
    pub fn plain_text(&self) -> String {
        match self {
            Block::Paragraph(children) | Block::Heading { children, .. } => inline_text(children),
            Block::Image(image) => image.description.clone(),
            Block::BlockQuote(blocks) => block_text(blocks),
            Block::List { items, .. } => items
                .iter()
                .map(|item| block_text(item))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::CodeBlock { code, .. } => code.clone(),
            Block::Html(_) | Block::ThematicBreak => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Inline {
    Text(String),
    Styled {
        body: String,
        attributes: Vec<StyleAttribute>,
    },
    Image(ImageDirective),
    Markdown(MarkdownInline),
}

impl Inline {
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text(text.into())
    }

    /// Must be lifted into its own block
    pub fn is_block_worthy(&self) -> bool {
        matches!(self, Inline::Image(_))
    }

    pub fn plain_text(&self) -> String {
        match self {
            Inline::Text(text) => text.clone(),
            Inline::Styled { body, .. } => body.clone(),
            Inline::Image(image) => image.description.clone(),
            Inline::Markdown(markdown) => markdown.plain_text(),
        }
    }
}

/// Inline kinds owned by the markdown parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkdownInline {
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Strikethrough(Vec<Inline>),
    Link {
        destination: String,
        title: String,
        children: Vec<Inline>,
    },
    /// Plain markdown `![alt](src)`, kept inline
    Picture {
        destination: String,
        title: String,
        alt: String,
    },
    Code(String),
    Html(String),
    LineBreak,
}

impl MarkdownInline {
    pub fn plain_text(&self) -> String {
        match self {
            MarkdownInline::Emphasis(children)
            | MarkdownInline::Strong(children)
            | MarkdownInline::Strikethrough(children)
            | MarkdownInline::Link { children, .. } => inline_text(children),
            MarkdownInline::Picture { alt, .. } => alt.clone(),
            MarkdownInline::Code(code) => code.clone(),
            MarkdownInline::Html(_) => String::new(),
            MarkdownInline::LineBreak => "\n".to_string(),
        }
    }

    /// Children that may hold annotation text
    pub fn children_mut(&mut self) -> Option<&mut Vec<Inline>> {
        match self {
            MarkdownInline::Emphasis(children)
            | MarkdownInline::Strong(children)
            | MarkdownInline::Strikethrough(children)
            | MarkdownInline::Link { children, .. } => Some(children),
            _ => None,
        }
    }
}

pub fn inline_text(inlines: &[Inline]) -> String {
    inlines.iter().map(Inline::plain_text).collect()
}

fn block_text(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(Block::plain_text)
        .collect::<Vec<_>>()
        .join("\n")
}
