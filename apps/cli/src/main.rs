//! Playscout CLI — resolve a content-listing page to its playlist URLs.
//!
//! Prints exactly one line to stdout: the absolute path of the written
//! result file. Everything else goes to stderr.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
