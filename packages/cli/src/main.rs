mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    check, edit, init, render, scan, CheckArgs, EditArgs, InitArgs, RenderArgs, ScanArgs,
};

/// notemark - annotated notes: scan, check, render and edit
#[derive(Parser, Debug)]
#[command(name = "notemark")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a notemark.config.json and an example note
    Init(InitArgs),

    /// List the annotations in a note
    Scan(ScanArgs),

    /// Report malformed annotations
    Check(CheckArgs),

    /// Show the block tree of a note
    Render(RenderArgs),

    /// Apply one edit at a selection
    Edit(EditArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Scan(args) => scan(args, &cwd),
        Command::Check(args) => check(args, &cwd),
        Command::Render(args) => render(args, &cwd),
        Command::Edit(args) => edit(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
