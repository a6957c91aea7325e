use std::io::Write;

use clap::Parser;
use sci0::resources::{ResourceArchive, ResourceType};

#[derive(Parser)]
pub(super) struct List {
    /// Only list resources of this type (e.g. view, pic, script).
    #[clap(long = "type", short = 't')]
    res_type: Option<ResourceType>,

    /// Only list resources that failed to load.
    #[clap(long)]
    errors_only: bool,
}

impl List {
    pub(super) fn run(&self, archive: &ResourceArchive, out: &mut dyn Write) -> anyhow::Result<()> {
        let records = archive
            .iter()
            .map(|res| res.record())
            .filter(|record| {
                self.res_type
                    .is_none_or(|res_type| record.key().type_id() == res_type)
            })
            .filter(|record| !self.errors_only || !record.is_ok());
        for record in records {
            writeln!(out, "{record}")?;
        }
        Ok(())
    }
}
