//! filingdigest CLI: summarize regulatory filing documents into a CSV table.
//!
//! Reads a table of filing records, fetches each referenced XML document,
//! and writes one flattened row per document.

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
