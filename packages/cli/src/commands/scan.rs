use super::{read_note, OutputFormat};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use notemark_parser::{scan_document, Annotation, Segment};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Note file to scan
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub fn scan(args: ScanArgs, _cwd: &str) -> Result<()> {
    let source = read_note(&args.input)?;
    let lines = scan_document(&source);

    if args.format == OutputFormat::Json {
        let annotations: Vec<&Segment<'_>> = lines
            .iter()
            .flatten()
            .filter(|segment| !segment.is_plain())
            .collect();
        println!("{}", serde_json::to_string_pretty(&annotations)?);
        return Ok(());
    }

    let mut count = 0;
    for (number, line) in lines.iter().enumerate() {
        for segment in line.iter().filter(|segment| !segment.is_plain()) {
            count += 1;
            println!(
                "{:>4}:{:<4} {}",
                number + 1,
                segment.span.start,
                describe(&segment.annotation)
            );
        }
    }

    println!();
    println!(
        "   {} annotations in {}",
        count.to_string().bright_white().bold(),
        args.input.display()
    );
    Ok(())
}

fn describe(annotation: &Annotation) -> String {
    match annotation {
        Annotation::Plain { text } => text.dimmed().to_string(),
        Annotation::Styled { body, attributes } => {
            let attributes: Vec<String> = attributes.iter().map(ToString::to_string).collect();
            format!(
                "{} {} {}",
                "style".green().bold(),
                body.bright_white(),
                attributes.join(", ").dimmed()
            )
        }
        Annotation::Image {
            description,
            source,
            alignment,
        } => format!(
            "{} {} {} {}",
            "image".cyan().bold(),
            description.bright_white(),
            source.underline(),
            alignment.to_string().dimmed()
        ),
    }
}
