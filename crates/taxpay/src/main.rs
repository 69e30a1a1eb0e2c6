//! Taxpay - Entry Point
//!
//! Binary entry point for the tourist-tax service registry CLI.

use clap::Parser;
use taxpay::cli::{Cli, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run(Cli::parse()).await
}
