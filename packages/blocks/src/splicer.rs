//! Inline splicing
//!
//! Literal text runs from the markdown parser are re-scanned for
//! annotations. Styled runs stay inline; image directives are lifted out
//! of their paragraph into standalone blocks, splitting the paragraph
//! around them while keeping the original order.
//!
//! The scan runs on text the markdown parser has already unescaped, so
//! `\[a]{style| ...}` still splices as an annotation. Code spans are the
//! way to keep annotation syntax literal.

use crate::tree::{Block, ImageDirective, Inline, MarkdownInline};
use notemark_parser::{scan_document, Annotation};

/// Splice every paragraph in a block tree
pub fn splice_blocks(blocks: Vec<Block>) -> Vec<Block> {
    blocks.into_iter().flat_map(splice_block).collect()
}

fn splice_block(block: Block) -> Vec<Block> {
    match block {
        Block::Paragraph(children) => splice_paragraph(children),
        Block::Heading { level, children } => vec![Block::Heading {
            level,
            children: rescan_inlines(children),
        }],
        Block::BlockQuote(children) => vec![Block::BlockQuote(splice_blocks(children))],
        Block::List { start, items } => vec![Block::List {
            start,
            items: items.into_iter().map(splice_blocks).collect(),
        }],
        other => vec![other],
    }
}

/// Turn one paragraph's inlines into a flat list of blocks
pub fn splice_paragraph(inlines: Vec<Inline>) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut run = Vec::new();

    for inline in rescan_inlines(inlines) {
        match inline {
            Inline::Image(image) => {
                flush_run(&mut blocks, &mut run);
                blocks.push(Block::Image(image));
            }
            other => run.push(other),
        }
    }
    flush_run(&mut blocks, &mut run);

    blocks
}

/// Replace literal text runs with scanned annotation nodes.
///
/// Recurses into emphasis, strong, strikethrough and link labels; code
/// spans, raw HTML and markdown pictures are left alone.
pub fn rescan_inlines(inlines: Vec<Inline>) -> Vec<Inline> {
    let mut output = Vec::new();

    for inline in merge_text(inlines) {
        match inline {
            Inline::Text(text) => output.extend(scan_text(&text)),
            Inline::Markdown(mut markdown) => {
                if let Some(children) = markdown.children_mut() {
                    *children = rescan_inlines(std::mem::take(children));
                }
                output.push(Inline::Markdown(markdown));
            }
            other => output.push(other),
        }
    }

    output
}

fn scan_text(text: &str) -> Vec<Inline> {
    let mut output = Vec::new();

    for (i, line) in scan_document(text).into_iter().enumerate() {
        if i > 0 {
            output.push(Inline::Markdown(MarkdownInline::LineBreak));
        }
        output.extend(line.into_iter().map(|segment| match segment.annotation {
            Annotation::Plain { text } => Inline::Text(text),
            Annotation::Styled { body, attributes } => Inline::Styled { body, attributes },
            Annotation::Image {
                description,
                source,
                alignment,
            } => Inline::Image(ImageDirective {
                description,
                source,
                alignment,
            }),
        }));
    }

    output
}

fn merge_text(inlines: Vec<Inline>) -> Vec<Inline> {
    let mut merged: Vec<Inline> = Vec::with_capacity(inlines.len());
    for inline in inlines {
        if let Inline::Text(text) = &inline {
            if let Some(Inline::Text(last)) = merged.last_mut() {
                last.push_str(text);
                continue;
            }
        }
        merged.push(inline);
    }
    merged
}

/// Emit the pending inline run as a paragraph unless it is blank
fn flush_run(blocks: &mut Vec<Block>, run: &mut Vec<Inline>) {
    let mut children = std::mem::take(run);

    while is_blank_edge(children.first()) {
        children.remove(0);
    }
    while is_blank_edge(children.last()) {
        children.pop();
    }
    if let Some(Inline::Text(text)) = children.first_mut() {
        *text = text.trim_start().to_string();
    }
    if let Some(Inline::Text(text)) = children.last_mut() {
        *text = text.trim_end().to_string();
    }

    if !children.is_empty() {
        blocks.push(Block::Paragraph(children));
    }
}

fn is_blank_edge(inline: Option<&Inline>) -> bool {
    match inline {
        Some(Inline::Text(text)) => text.trim().is_empty(),
        Some(Inline::Markdown(MarkdownInline::LineBreak)) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notemark_parser::{Alignment, StyleAttribute};

    fn logo() -> ImageDirective {
        ImageDirective {
            description: "logo".to_string(),
            source: "logo.png".to_string(),
            alignment: Alignment::Left,
        }
    }

    #[test]
    fn test_image_splits_paragraph() {
        let blocks = splice_paragraph(vec![
            Inline::text("a "),
            Inline::Image(logo()),
            Inline::text(" b"),
        ]);

        assert_eq!(
            blocks,
            vec![
                Block::Paragraph(vec![Inline::text("a")]),
                Block::Image(logo()),
                Block::Paragraph(vec![Inline::text("b")]),
            ]
        );
    }

    #[test]
    fn test_text_runs_are_rescanned() {
        let blocks = splice_paragraph(vec![Inline::text(
            "a [logo]{image| src: logo.png, align: left} b",
        )]);

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].plain_text(), "a");
        assert_eq!(blocks[1], Block::Image(logo()));
        assert_eq!(blocks[2].plain_text(), "b");
    }

    #[test]
    fn test_styled_runs_stay_inline() {
        let blocks = splice_paragraph(vec![Inline::text("3 [nuits]{style| color: red} !")]);

        assert_eq!(
            blocks,
            vec![Block::Paragraph(vec![
                Inline::text("3 "),
                Inline::Styled {
                    body: "nuits".to_string(),
                    attributes: vec![StyleAttribute::Color("red".to_string())],
                },
                Inline::text(" !"),
            ])]
        );
    }

    #[test]
    fn test_lone_image_has_no_empty_paragraphs() {
        let blocks = splice_paragraph(vec![
            Inline::text(" "),
            Inline::Image(logo()),
            Inline::Markdown(MarkdownInline::LineBreak),
            Inline::Image(logo()),
        ]);
        assert_eq!(blocks, vec![Block::Image(logo()), Block::Image(logo())]);
    }

    #[test]
    fn test_recursion_into_emphasis_but_not_code() {
        let inlines = rescan_inlines(vec![
            Inline::Markdown(MarkdownInline::Emphasis(vec![Inline::text(
                "[x]{style| size: 20}",
            )])),
            Inline::Markdown(MarkdownInline::Code("[y]{style| size: 20}".to_string())),
        ]);

        assert_eq!(
            inlines[0],
            Inline::Markdown(MarkdownInline::Emphasis(vec![Inline::Styled {
                body: "x".to_string(),
                attributes: vec![StyleAttribute::FontSize(20)],
            }]))
        );
        assert_eq!(
            inlines[1],
            Inline::Markdown(MarkdownInline::Code("[y]{style| size: 20}".to_string()))
        );
    }

    #[test]
    fn test_nested_image_is_not_promoted() {
        let blocks = splice_paragraph(vec![Inline::Markdown(MarkdownInline::Strong(vec![
            Inline::text("[logo]{image| src: logo.png, align: left}"),
        ]))]);

        assert_eq!(
            blocks,
            vec![Block::Paragraph(vec![Inline::Markdown(MarkdownInline::Strong(vec![
                Inline::Image(logo())
            ]))])]
        );
    }
}
