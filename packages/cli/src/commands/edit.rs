use super::read_note;
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use notemark_editor::{CurrentAnnotation, Edit, EditSession, Effect, MarkdownStyle, Selection};
use notemark_parser::{Alignment, Annotation, StyleAttribute};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Note file to edit in place
    pub input: PathBuf,

    /// Selection start (byte offset)
    #[arg(long)]
    pub start: usize,

    /// Selection end (byte offset), defaults to a cursor at --start
    #[arg(long)]
    pub stop: Option<usize>,

    /// Print the edited note instead of writing it back
    #[arg(long)]
    pub stdout: bool,

    #[command(subcommand)]
    pub action: EditAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum EditAction {
    /// Style the selection, or restyle the annotation it falls in
    Style {
        #[arg(long)]
        font: Option<String>,

        #[arg(long)]
        size: Option<u32>,

        #[arg(long)]
        color: Option<String>,

        #[arg(long)]
        background: Option<String>,
    },

    /// Turn the selection into an image directive
    Image {
        #[arg(long)]
        src: String,

        /// left, right or center
        #[arg(long, default_value = "center", value_parser = parse_alignment)]
        align: Alignment,
    },

    /// Strip the annotation under the selection
    Remove,

    Bold,

    Italic,

    Heading {
        #[arg(default_value_t = 1)]
        level: u8,
    },
}

fn parse_alignment(value: &str) -> Result<Alignment, String> {
    Alignment::from_keyword(value).ok_or_else(|| format!("invalid alignment: {}", value))
}

pub fn edit(args: EditArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let source = read_note(&args.input)?;

    let mut session = EditSession::new(source.clone(), &config.editor);
    let selection = Selection::new(args.start, args.stop.unwrap_or(args.start));
    session.selection_changed(selection);
    // The snap-back is for interactive hosts; nothing to show here.
    session.next_frame();

    let edit = build_edit(&args.action, session.state().current())?;
    session.apply(&edit)?;

    if session.text() == source {
        if session.selection().is_collapsed() {
            println!(
                "{} Article style is now {}",
                "✓".green(),
                serde_json::to_string(session.state().article_style())?
            );
        } else {
            println!("{} Nothing changed", "⚠️".yellow());
        }
        return Ok(());
    }

    if args.stdout {
        println!("{}", session.text());
    } else {
        std::fs::write(&args.input, session.text())?;
        println!(
            "{} {} {}",
            "✓".green(),
            edit.name().bright_white().bold(),
            args.input.display()
        );
    }

    for effect in session.next_frame() {
        let Effect::SetSelection { start, stop } = effect;
        eprintln!("   selection: {}..{}", start, stop);
    }

    Ok(())
}

/// Pick the edit for an action, given the annotation the selection snapped to
pub fn build_edit(action: &EditAction, current: Option<&CurrentAnnotation>) -> Result<Edit> {
    let edit = match action {
        EditAction::Style {
            font,
            size,
            color,
            background,
        } => {
            let mut attributes = Vec::new();
            if let Some(font) = font {
                attributes.push(StyleAttribute::Font(font.clone()));
            }
            if let Some(size) = size {
                attributes.push(StyleAttribute::FontSize(*size));
            }
            if let Some(color) = color {
                attributes.push(StyleAttribute::Color(color.clone()));
            }
            if let Some(background) = background {
                attributes.push(StyleAttribute::BackgroundColor(background.clone()));
            }

            match current {
                Some(CurrentAnnotation {
                    bounds,
                    annotation: Annotation::Styled { .. },
                }) => Edit::Update {
                    bounds: *bounds,
                    attributes,
                },
                Some(_) => return Err(anyhow!("Selection is on an image, not styled text")),
                None => Edit::Insert { attributes },
            }
        }
        EditAction::Image { src, align } => Edit::InsertImage {
            source: src.clone(),
            alignment: *align,
        },
        EditAction::Remove => {
            let current = current.ok_or_else(|| anyhow!("No annotation at the selection"))?;
            Edit::Remove {
                bounds: current.bounds,
            }
        }
        EditAction::Bold => Edit::Markdown {
            style: MarkdownStyle::Bold,
        },
        EditAction::Italic => Edit::Markdown {
            style: MarkdownStyle::Italic,
        },
        EditAction::Heading { level } => Edit::Markdown {
            style: MarkdownStyle::Heading(*level),
        },
    };
    Ok(edit)
}
