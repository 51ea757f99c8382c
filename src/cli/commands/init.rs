use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::core::config::CONFIG_FILE;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to place .tsreport.yml in (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing .tsreport.yml
    #[arg(long)]
    pub force: bool,
}

pub async fn execute(args: &InitArgs) -> Result<()> {
    let path = args.path.canonicalize()?;
    let config_path = path.join(CONFIG_FILE);

    if config_path.exists() && !args.force {
        println!(
            "  {} {} already exists. Use {} to overwrite.",
            "SKIP".yellow(),
            CONFIG_FILE,
            "--force".bold()
        );
        return Ok(());
    }

    std::fs::write(&config_path, STARTER_CONFIG)?;
    println!("  {} {} created", "DONE".green(), config_path.display());
    println!("  Edit it to reorder reporters or point the JSON report elsewhere.");

    Ok(())
}

const STARTER_CONFIG: &str = r#"# tsreport configuration

# Reporters run in this order; later ones can reuse context entries
# written by earlier ones.
reporters:
  - console
  - json

json:
  # Directory the ts-<timestamp>.json report lands in.
  location: "."
  # Set to "true" to keep the report in memory only.
  silent: "false"
"#;
