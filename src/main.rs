use anyhow::Result;
use args::Args;

mod args;
mod cli;
mod error;
mod output;
mod virustotal;

use clap::Parser;
use tracing::Level;
pub use error::Error;

fn main() -> Result<()> {
    let args = Args::parse();

    // silent mode is meant for piping, so drop everything below ERROR
    let level = if args.silent {
        Level::ERROR
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    cli::run(args)?;

    Ok(())
}
