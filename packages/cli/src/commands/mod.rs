pub mod check;
pub mod edit;
pub mod init;
pub mod render;
pub mod scan;

pub use check::{check, CheckArgs};
pub use edit::{edit, EditArgs};
pub use init::{init, InitArgs};
pub use render::{render, RenderArgs};
pub use scan::{scan, ScanArgs};

use anyhow::{anyhow, Result};
use clap::ValueEnum;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn read_note(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| anyhow!("Cannot read {}: {}", path.display(), e))
}
