pub mod commands;
pub mod progress;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "tsreport",
    version,
    about = "Publish fetched timesheet results through a reporter chain"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Publish a saved fetch result through the configured reporters
    Report(commands::report::ReportArgs),
    /// Write a starter .tsreport.yml
    Init(commands::init::InitArgs),
}
