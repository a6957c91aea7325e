mod check;
mod dump;
mod extract;
mod list;

use std::{io::Write, path::PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use sci0::{
    resources::{ArchiveConfig, ResourceArchive},
    source::{ByteSource, CachingSource, DirSource, HttpSource},
};

#[derive(Parser)]
#[clap(name = "sci0", version)]
pub(crate) struct Cli {
    #[clap(flatten)]
    source: SourceArgs,

    /// Fetch files every time they are needed instead of caching them.
    #[clap(long, global = true)]
    no_cache: bool,

    /// Load resources one at a time instead of in parallel.
    #[clap(long, global = true)]
    sequential: bool,

    /// Log at debug level.
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Cmd,
}

/// Where the game files come from.
#[derive(Args)]
#[group(required = true, multiple = false)]
struct SourceArgs {
    /// Path to the game's root directory.
    #[clap(long)]
    dir: Option<PathBuf>,

    /// Base URL the game's files are served from.
    #[clap(long)]
    url: Option<String>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Lists every resource in the map, with its size and location.
    List(list::List),

    /// Dumps the decoded content of a resource as hex.
    Dump(dump::Dump),

    /// Writes every decoded resource to a directory.
    Extract(extract::Extract),

    /// Loads every resource and summarizes any failures.
    Check(check::Check),
}

impl Cli {
    pub(crate) fn verbose(&self) -> bool {
        self.verbose
    }

    fn open_source(&self) -> anyhow::Result<Box<dyn ByteSource>> {
        let source: Box<dyn ByteSource> = match (&self.source.dir, &self.source.url) {
            (Some(dir), _) => Box::new(DirSource::new(dir)),
            (None, Some(url)) => Box::new(
                HttpSource::new(url).with_context(|| format!("Invalid base URL: {url}"))?,
            ),
            (None, None) => anyhow::bail!("Either --dir or --url is required"),
        };
        if self.no_cache {
            Ok(source)
        } else {
            Ok(Box::new(CachingSource::new(source)))
        }
    }

    fn open_archive(&self) -> anyhow::Result<ResourceArchive> {
        let source = self.open_source()?;
        let config = ArchiveConfig::new().with_parallel(!self.sequential);
        ResourceArchive::open(&*source, &config).context("Failed to open resource archive")
    }

    pub(crate) fn run(&self) -> anyhow::Result<()> {
        let archive = self.open_archive()?;
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.run_with(&archive, &mut out)?;
        out.flush()?;
        Ok(())
    }

    fn run_with(&self, archive: &ResourceArchive, out: &mut dyn Write) -> anyhow::Result<()> {
        match &self.command {
            Cmd::List(list) => list.run(archive, out),
            Cmd::Dump(dump) => dump.run(archive, out),
            Cmd::Extract(extract) => extract.run(archive, out),
            Cmd::Check(check) => check.run(archive, out),
        }
    }
}
