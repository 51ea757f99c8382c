use anyhow::{Context as _, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::cli::progress::PublishProgress;
use crate::core::config::Config;
use crate::core::context::ReportContext;
use crate::fetch::{Fetcher, FileFetcher};
use crate::reporters::console::ConsoleReporter;
use crate::reporters::json::JsonReporter;
use crate::reporters::Reporter;

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Saved fetch result to publish (JSON file)
    pub input: PathBuf,

    /// Directory holding .tsreport.yml (defaults to current directory)
    #[arg(long, default_value = ".")]
    pub path: PathBuf,
}

pub async fn execute(args: &ReportArgs) -> Result<()> {
    let config = Config::load(&args.path);
    let result = FileFetcher::new(&args.input).fetch().await?;

    let mut reporters = build_chain(&config.chain());
    if reporters.is_empty() {
        anyhow::bail!("no usable reporters configured");
    }

    for reporter in reporters.iter_mut() {
        let section = config.reporter_config(reporter.name());
        reporter.init(&section);
    }

    let mut context = ReportContext::new();
    let progress = PublishProgress::new();
    for reporter in &reporters {
        progress.set_reporter(reporter.name());
        reporter
            .publish(&result, &mut context)
            .with_context(|| format!("reporter {} failed", reporter.name()))?;
    }
    progress.finish();

    let mut artifacts: Vec<&str> = context.keys().collect();
    artifacts.sort_unstable();
    println!(
        "  {} {} published through {} reporters (context: {})",
        "DONE".green(),
        args.input.display(),
        reporters.len(),
        artifacts.join(", ")
    );

    Ok(())
}

fn build_chain(names: &[String]) -> Vec<Box<dyn Reporter>> {
    let mut chain: Vec<Box<dyn Reporter>> = Vec::new();
    for name in names {
        match name.to_ascii_lowercase().as_str() {
            "json" => chain.push(Box::new(JsonReporter::new())),
            "console" => chain.push(Box::new(ConsoleReporter)),
            other => tracing::warn!("unknown reporter {other:?} in config, skipping"),
        }
    }
    chain
}
