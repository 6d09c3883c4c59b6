//! Binary crate for the `pakweather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Running the proxy server
//! - Interactive configuration and city selection
//! - Human-friendly output formatting

use clap::Parser;

mod cli;
mod client;
mod logging;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    logging::init(cmd.log_filter());
    cmd.run().await
}
