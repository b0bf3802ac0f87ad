use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let config_json = serde_json::to_string_pretty(&Config::default())?;
    fs::write(&config_path, config_json)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    let example_file = PathBuf::from(cwd).join("example.md");
    if !example_file.exists() {
        let example_content = r#"# [Menu]{style| font: Georgia, size: 28}

[logo]{image| src: logo.png, align: center}

Soupe du jour : [7 €]{style| color: crimson}
[ nuits ]{style| color: dodger blue} : [ 150 ]{style| color: crimson} €
"#;
        fs::write(&example_file, example_content)?;
        println!("  {} Created example.md", "✓".green());
    }

    println!();
    println!("{}", "✨ notemark is ready".green().bold());
    println!("   Try: notemark render example.md");

    Ok(())
}
