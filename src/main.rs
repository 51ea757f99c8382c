mod cli;
mod core;
mod fetch;
mod reporters;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Report(args) => {
            cli::commands::report::execute(args).await?;
        }
        Commands::Init(args) => {
            cli::commands::init::execute(args).await?;
        }
    }

    Ok(())
}
