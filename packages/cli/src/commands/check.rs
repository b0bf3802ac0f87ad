use super::{read_note, OutputFormat};
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use notemark_parser::{diagnose, format_errors, ParseError};
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Note file or directory of notes
    pub input: PathBuf,

    /// List clean files too
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct FileReport {
    path: String,
    problems: Vec<Problem>,
}

#[derive(Debug, Serialize)]
struct Problem {
    start: usize,
    end: usize,
    message: String,
}

pub fn check(args: CheckArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;

    let files = if args.input.is_file() {
        vec![args.input.clone()]
    } else if args.input.is_dir() {
        find_note_files(&args.input, &config)
    } else {
        return Err(anyhow!(
            "Input path does not exist: {}",
            args.input.display()
        ));
    };

    let mut reports = Vec::new();
    let mut total_problems = 0;

    for file in &files {
        let source = read_note(file)?;
        let errors = diagnose(&source);
        total_problems += errors.len();

        if args.format == OutputFormat::Json {
            reports.push(file_report(file, &errors));
            continue;
        }

        if errors.is_empty() {
            if args.verbose {
                println!("{} {}", "✓".green(), file.display());
            }
            continue;
        }

        let name = file.display().to_string();
        eprint!("{}", format_errors(&source, &name, &errors));
    }

    if args.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        println!();
        println!("   Files checked: {}", files.len());
        if total_problems == 0 {
            println!("   {} No malformed annotations", "✓".green());
        } else {
            println!(
                "   {} {} malformed annotations (shown as plain text)",
                "Warnings:".yellow(),
                total_problems
            );
        }
    }

    if total_problems > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn file_report(path: &Path, errors: &[ParseError]) -> FileReport {
    FileReport {
        path: path.display().to_string(),
        problems: errors
            .iter()
            .map(|error| {
                let span = error.span();
                Problem {
                    start: span.start,
                    end: span.end,
                    message: error.to_string(),
                }
            })
            .collect(),
    }
}

fn find_note_files(dir: &Path, config: &Config) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && config.is_note(path))
        .collect();
    files.sort();
    files
}
