//! Block markdown boundary
//!
//! Builds the [`Block`] tree from `pulldown-cmark` events. Annotation
//! syntax is left as literal text here; see [`crate::splicer`]. Soft line
//! breaks become hard breaks, and adjacent text events are merged so an
//! annotation split by the link scanner (`[`, `x`, `]`...) is whole again.

use crate::tree::{Block, Inline, MarkdownInline};
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

#[derive(Debug)]
enum Container {
    Root,
    BlockQuote,
    List(Option<u64>),
    Item,
}

#[derive(Debug)]
struct BlockFrame {
    container: Container,
    blocks: Vec<Block>,
    items: Vec<Vec<Block>>,
}

impl BlockFrame {
    fn new(container: Container) -> Self {
        Self {
            container,
            blocks: Vec::new(),
            items: Vec::new(),
        }
    }
}

#[derive(Debug)]
enum InlineContainer {
    /// `implicit` paragraphs hold the loose text of tight list items
    Paragraph { implicit: bool },
    Heading(u8),
    Emphasis,
    Strong,
    Strikethrough,
    Link { destination: String, title: String },
    Picture { destination: String, title: String },
}

#[derive(Debug)]
struct InlineFrame {
    container: InlineContainer,
    children: Vec<Inline>,
}

#[derive(Default)]
struct TreeBuilder {
    blocks: Vec<BlockFrame>,
    inlines: Vec<InlineFrame>,
    code: Option<(Option<String>, String)>,
    html: Option<String>,
}

/// Parse `text` as block markdown
pub fn parse_blocks(text: &str) -> Vec<Block> {
    let mut builder = TreeBuilder {
        blocks: vec![BlockFrame::new(Container::Root)],
        ..Default::default()
    };

    for event in Parser::new_ext(text, Options::ENABLE_STRIKETHROUGH) {
        builder.event(event);
    }

    builder.finish()
}

fn heading_level_number(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn fence_language(info: &str) -> Option<String> {
    let token = info
        .trim()
        .split(|ch: char| ch.is_whitespace() || matches!(ch, ',' | '{' | '}'))
        .next()
        .unwrap_or_default();
    (!token.is_empty()).then(|| token.to_string())
}

impl TreeBuilder {
    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                if let Some((_, code)) = &mut self.code {
                    code.push_str(&text);
                } else {
                    self.push_text(&text);
                }
            }
            Event::Code(code) => self.push_inline(Inline::Markdown(MarkdownInline::Code(code.into_string()))),
            Event::Html(html) => match &mut self.html {
                Some(block) => block.push_str(&html),
                None => self.push_inline(Inline::Markdown(MarkdownInline::Html(html.into_string()))),
            },
            Event::InlineHtml(html) => {
                self.push_inline(Inline::Markdown(MarkdownInline::Html(html.into_string())))
            }
            Event::SoftBreak | Event::HardBreak => {
                self.push_inline(Inline::Markdown(MarkdownInline::LineBreak))
            }
            Event::Rule => {
                self.close_implicit_paragraph();
                self.push_block(Block::ThematicBreak);
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                self.close_implicit_paragraph();
                self.open_inline(InlineContainer::Paragraph { implicit: false });
            }
            Tag::Heading { level, .. } => {
                self.close_implicit_paragraph();
                self.open_inline(InlineContainer::Heading(heading_level_number(level)));
            }
            Tag::BlockQuote(_) => self.open_block(Container::BlockQuote),
            Tag::List(start) => self.open_block(Container::List(start)),
            Tag::Item => self.open_block(Container::Item),
            Tag::CodeBlock(kind) => {
                self.close_implicit_paragraph();
                let language = match kind {
                    CodeBlockKind::Fenced(info) => fence_language(&info),
                    CodeBlockKind::Indented => None,
                };
                self.code = Some((language, String::new()));
            }
            Tag::HtmlBlock => {
                self.close_implicit_paragraph();
                self.html = Some(String::new());
            }
            Tag::Emphasis => self.open_nested_inline(InlineContainer::Emphasis),
            Tag::Strong => self.open_nested_inline(InlineContainer::Strong),
            Tag::Strikethrough => self.open_nested_inline(InlineContainer::Strikethrough),
            Tag::Link { dest_url, title, .. } => self.open_nested_inline(InlineContainer::Link {
                destination: dest_url.into_string(),
                title: title.into_string(),
            }),
            Tag::Image { dest_url, title, .. } => self.open_nested_inline(InlineContainer::Picture {
                destination: dest_url.into_string(),
                title: title.into_string(),
            }),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph | TagEnd::Heading(_) => self.close_inline(),
            TagEnd::Emphasis
            | TagEnd::Strong
            | TagEnd::Strikethrough
            | TagEnd::Link
            | TagEnd::Image => self.close_inline(),
            TagEnd::BlockQuote(_) | TagEnd::List(_) | TagEnd::Item => {
                self.close_implicit_paragraph();
                self.close_block();
            }
            TagEnd::CodeBlock => {
                if let Some((language, code)) = self.code.take() {
                    self.push_block(Block::CodeBlock { language, code });
                }
            }
            TagEnd::HtmlBlock => {
                if let Some(html) = self.html.take() {
                    self.push_block(Block::Html(html));
                }
            }
            _ => {}
        }
    }

    fn open_block(&mut self, container: Container) {
        self.close_implicit_paragraph();
        self.blocks.push(BlockFrame::new(container));
    }

    fn close_block(&mut self) {
        if self.blocks.len() <= 1 {
            return;
        }
        let Some(frame) = self.blocks.pop() else {
            return;
        };
        match frame.container {
            Container::BlockQuote => self.push_block(Block::BlockQuote(frame.blocks)),
            Container::List(start) => self.push_block(Block::List {
                start,
                items: frame.items,
            }),
            Container::Item => {
                if let Some(parent) = self.blocks.last_mut() {
                    parent.items.push(frame.blocks);
                }
            }
            Container::Root => {}
        }
    }

    fn push_block(&mut self, block: Block) {
        if let Some(frame) = self.blocks.last_mut() {
            frame.blocks.push(block);
        }
    }

    fn open_inline(&mut self, container: InlineContainer) {
        self.inlines.push(InlineFrame {
            container,
            children: Vec::new(),
        });
    }

    /// Inline containers inside loose item text need a paragraph to live in
    fn open_nested_inline(&mut self, container: InlineContainer) {
        self.ensure_paragraph();
        self.open_inline(container);
    }

    fn close_inline(&mut self) {
        let Some(frame) = self.inlines.pop() else {
            return;
        };
        match frame.container {
            InlineContainer::Paragraph { .. } => self.push_block(Block::Paragraph(frame.children)),
            InlineContainer::Heading(level) => self.push_block(Block::Heading {
                level,
                children: frame.children,
            }),
            InlineContainer::Emphasis => {
                self.push_inline(Inline::Markdown(MarkdownInline::Emphasis(frame.children)))
            }
            InlineContainer::Strong => {
                self.push_inline(Inline::Markdown(MarkdownInline::Strong(frame.children)))
            }
            InlineContainer::Strikethrough => {
                self.push_inline(Inline::Markdown(MarkdownInline::Strikethrough(frame.children)))
            }
            InlineContainer::Link { destination, title } => {
                self.push_inline(Inline::Markdown(MarkdownInline::Link {
                    destination,
                    title,
                    children: frame.children,
                }))
            }
            InlineContainer::Picture { destination, title } => {
                let alt = crate::tree::inline_text(&frame.children);
                self.push_inline(Inline::Markdown(MarkdownInline::Picture {
                    destination,
                    title,
                    alt,
                }))
            }
        }
    }

    fn ensure_paragraph(&mut self) {
        if self.inlines.is_empty() {
            self.open_inline(InlineContainer::Paragraph { implicit: true });
        }
    }

    fn close_implicit_paragraph(&mut self) {
        if let [InlineFrame {
            container: InlineContainer::Paragraph { implicit: true },
            ..
        }] = self.inlines.as_slice()
        {
            self.close_inline();
        }
    }

    fn push_inline(&mut self, inline: Inline) {
        self.ensure_paragraph();
        if let Some(frame) = self.inlines.last_mut() {
            frame.children.push(inline);
        }
    }

    fn push_text(&mut self, text: &str) {
        self.ensure_paragraph();
        let Some(frame) = self.inlines.last_mut() else {
            return;
        };
        if let Some(Inline::Text(last)) = frame.children.last_mut() {
            last.push_str(text);
        } else {
            frame.children.push(Inline::text(text));
        }
    }

    fn finish(mut self) -> Vec<Block> {
        while !self.inlines.is_empty() {
            self.close_inline();
        }
        while self.blocks.len() > 1 {
            self.close_block();
        }
        self.blocks.pop().map(|root| root.blocks).unwrap_or_default()
    }
}
