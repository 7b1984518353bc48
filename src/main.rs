//! CLI entry point for crystalized image generation

use clap::Parser;
use crystalize::io::cli::{Cli, Runner};
use crystalize::io::logging::init_logging;

fn main() -> crystalize::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity());
    Runner::new(cli)
        .process()
        .inspect_err(|e| tracing::error!("{e}"))
}
