//! A CLI for inspecting the resources of SCI0 games.
//!
//! Resources can be read from a game directory or from a URL that serves the
//! game's files.

mod cli;

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    init_logging(args.verbose());
    args.run()
}
