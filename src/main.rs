//! CLI entry point for the terrazzo pattern renderer

use clap::Parser;
use terrazzo::io::cli::{Cli, PatternProcessor};

fn main() -> terrazzo::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut processor = PatternProcessor::new(cli);
    processor.process()
}
