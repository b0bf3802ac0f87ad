use super::{read_note, OutputFormat};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use notemark_blocks::{render as render_blocks, Block, Inline};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Note file to render
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub fn render(args: RenderArgs, _cwd: &str) -> Result<()> {
    let source = read_note(&args.input)?;
    let blocks = render_blocks(&source);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&blocks)?),
        OutputFormat::Text => {
            for block in &blocks {
                print_block(block, 0);
            }
        }
    }
    Ok(())
}

fn print_block(block: &Block, depth: usize) {
    let indent = "  ".repeat(depth);
    match block {
        Block::Paragraph(children) => println!("{}{}", indent, inline_line(children)),
        Block::Heading { level, children } => println!(
            "{}{} {}",
            indent,
            "#".repeat(usize::from(*level)).bright_blue(),
            inline_line(children).bold()
        ),
        Block::Image(image) => println!(
            "{}{} {} ({}, {})",
            indent,
            "[image]".cyan().bold(),
            image.description,
            image.source.underline(),
            image.alignment
        ),
        Block::BlockQuote(children) => {
            println!("{}{}", indent, ">".dimmed());
            for child in children {
                print_block(child, depth + 1);
            }
        }
        Block::List { start, items } => {
            for (i, item) in items.iter().enumerate() {
                let marker = match start {
                    Some(first) => format!("{}.", first + i as u64),
                    None => "-".to_string(),
                };
                println!("{}{}", indent, marker.dimmed());
                for child in item {
                    print_block(child, depth + 1);
                }
            }
        }
        Block::CodeBlock { code, .. } => {
            for line in code.lines() {
                println!("{}{}", indent, line.dimmed());
            }
        }
        Block::Html(html) => println!("{}{}", indent, html.trim_end().dimmed()),
        Block::ThematicBreak => println!("{}{}", indent, "───".dimmed()),
    }
}

fn inline_line(children: &[Inline]) -> String {
    children
        .iter()
        .map(|inline| match inline {
            Inline::Styled { body, .. } => body.green().to_string(),
            other => other.plain_text(),
        })
        .collect()
}
