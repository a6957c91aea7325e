use std::io::Write;

use clap::Parser;
use itertools::Itertools as _;
use sci0::resources::ResourceArchive;

#[derive(Parser)]
pub(super) struct Check {}

impl Check {
    pub(super) fn run(&self, archive: &ResourceArchive, out: &mut dyn Write) -> anyhow::Result<()> {
        let total = archive.len();
        let failures_by_kind = archive
            .failures()
            .filter_map(|record| record.error())
            .map(sci0::resources::LoadError::kind)
            .counts();
        let failed: usize = failures_by_kind.values().sum();

        writeln!(out, "{} resources, {} loaded, {failed} failed", total, total - failed)?;
        for (kind, count) in failures_by_kind.into_iter().sorted() {
            writeln!(out, "  {kind}: {count}")?;
        }

        let bad_typed = archive
            .iter()
            .filter(|res| matches!(res.typed(), Some(Err(_))))
            .count();
        if bad_typed > 0 {
            writeln!(out, "{bad_typed} resources could not be parsed")?;
        }

        if failed > 0 {
            anyhow::bail!("{failed} of {total} resources failed to load");
        }
        Ok(())
    }
}
