use std::{io::Write, path::PathBuf};

use anyhow::Context as _;
use clap::Parser;
use sci0::resources::ResourceArchive;

#[derive(Parser)]
pub(super) struct Extract {
    /// Directory to write the resources to. Created if missing.
    out_dir: PathBuf,

    /// If set, prints what would be written without writing anything.
    #[clap(short = 'n', long)]
    dry_run: bool,
}

impl Extract {
    pub(super) fn run(&self, archive: &ResourceArchive, out: &mut dyn Write) -> anyhow::Result<()> {
        if !self.dry_run {
            std::fs::create_dir_all(&self.out_dir).with_context(|| {
                format!("Failed to create output directory {}", self.out_dir.display())
            })?;
        }

        let mut written = 0;
        for res in archive {
            let record = res.record();
            let Ok(data) = record.data() else {
                log::warn!("Skipping {record}");
                continue;
            };
            let path = self.out_dir.join(record.key().to_string());
            if self.dry_run {
                writeln!(out, "DRY_RUN: Writing {} to {}", record.key(), path.display())?;
            } else {
                log::debug!("Writing {} to {}", record.key(), path.display());
                std::fs::write(&path, data)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
            written += 1;
        }
        writeln!(
            out,
            "Extracted {written} of {} resources to {}",
            archive.len(),
            self.out_dir.display()
        )?;
        Ok(())
    }
}
