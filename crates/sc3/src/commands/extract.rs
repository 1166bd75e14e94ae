use miette::{Context, IntoDiagnostic, Result};
use sc3_ixf::{resource, IxfArchive};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use super::discover;

pub struct ExtractArgs {
    /// A container file or a directory of containers
    pub input: PathBuf,

    /// A target directory
    pub output: PathBuf,

    /// Allow overwriting existing output files
    pub overwrite: bool,
}

impl ExtractArgs {
    pub fn handle(&self) -> Result<()> {
        let containers = discover(&self.input);
        if containers.is_empty() {
            info!("no containers found under {}", self.input.display());
            return Ok(());
        }

        std::fs::create_dir_all(&self.output)
            .into_diagnostic()
            .context(format!("creating {}", self.output.display()))?;

        // One bad container must not stop the rest of the run.
        for path in &containers {
            if let Err(e) = self.extract_one(path) {
                error!("{}: {}", path.display(), e);
            }
        }
        Ok(())
    }

    fn extract_one(&self, path: &Path) -> Result<()> {
        let f = File::open(path)
            .into_diagnostic()
            .context(format!("path: {}", path.display()))?;
        let mut ixf = IxfArchive::new(f)?;

        info!("{}: {} entries", path.display(), ixf.len());

        let entries = ixf.entries().to_vec();
        for entry in entries {
            // Decode fully before touching the filesystem so a failed
            // decode leaves no partial file behind.
            let bytes = ixf.read_resource(&entry)?;

            let target = self.output.join(resource::output_name(&entry));
            info!("writing {}", target.display());

            let mut out = if self.overwrite {
                File::create(&target)
            } else {
                File::create_new(&target)
            }
            .into_diagnostic()
            .context(format!("creating {}", target.display()))?;

            out.write_all(&bytes).into_diagnostic()?;
        }
        Ok(())
    }
}
