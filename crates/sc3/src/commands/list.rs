use miette::{Context, IntoDiagnostic, Result};
use owo_colors::{colors::Green, OwoColorize};
use sc3_ixf::IxfArchive;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::error;

use super::discover;

pub struct ListArgs {
    /// A container file or a directory of containers
    pub input: PathBuf,
}

impl ListArgs {
    pub fn handle(&self) -> Result<()> {
        for path in discover(&self.input) {
            if let Err(e) = list_one(&path) {
                error!("{}: {}", path.display(), e);
            }
        }
        Ok(())
    }
}

fn list_one(path: &Path) -> Result<()> {
    let f = File::open(path)
        .into_diagnostic()
        .context(format!("path: {}", path.display()))?;
    let ixf = IxfArchive::new(f)?;

    println!(
        "{} ({} entries)",
        path.display().fg::<Green>(),
        ixf.len()
    );
    for (i, entry) in ixf.entries().iter().enumerate() {
        println!(
            "  [{i:>4}] {}:{:08X}:{:08X} @ 0x{:08X} ({} bytes) {}",
            entry.res_type,
            entry.group,
            entry.instance,
            entry.offset,
            entry.length,
            entry.res_type.extension(),
        );
    }
    Ok(())
}
