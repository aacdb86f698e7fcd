use anyhow::Result;
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

mod config;
mod git;
mod metadata;
mod output;

use crate::config::Config;
use crate::git::GitAnalyzer;
use crate::metadata::MetadataCollector;
use crate::output::Reporter;

const SUMMARY_CONTRIBUTORS: usize = 5;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Application name embedded in the generated file
    #[arg(short, long)]
    app: Option<String>,

    /// Package the generated file belongs to (Go output)
    #[arg(short = 'P', long)]
    package: Option<String>,

    /// Name of the generated file (extension added per format)
    #[arg(short, long)]
    file_name: Option<String>,

    /// Directory to place the generated file in
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Output format (rust, go, json)
    #[arg(short, long)]
    output: Option<String>,

    /// Repository to read version and history from
    #[arg(short, long, default_value = ".")]
    repo: PathBuf,

    /// Configuration file
    #[arg(short, long, env = "GENVER_CONFIG", default_value = "genver.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply(self, config: &mut Config) {
        let output = &mut config.output;
        if let Some(app) = self.app {
            output.app_name = app;
        }
        if let Some(package) = self.package {
            output.package = package;
        }
        if let Some(file_name) = self.file_name {
            output.file_name = file_name;
        }
        if let Some(path) = self.path {
            output.directory = path;
        }
        if let Some(format) = self.output {
            output.format = format;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase())),
        )
        .with_target(false)
        .init();

    println!(
        "{}",
        "genver - Build Metadata Generator".bright_cyan().bold()
    );
    println!(
        "Repository: {}",
        cli.repo.display().to_string().bright_white()
    );

    let mut config = Config::load(&cli.config)?;
    let repo = cli.repo.clone();
    cli.apply(&mut config);

    let format = config.output.output_format();
    let output_path = config.output.output_path();

    let git_analyzer = GitAnalyzer::new(&repo)?;
    let collector = MetadataCollector::new(config.commands.clone(), config.output.clone())?;
    let mut reporter = Reporter::new(format, &output_path);

    info!("Collecting build metadata...");
    let metadata = collector.collect(&git_analyzer).await?;

    println!("Version: {}", metadata.version.bright_white());
    println!(
        "Contributors: {} ({} lines)",
        metadata.contributors.len(),
        metadata.contributors.total_lines()
    );
    if metadata.contributors.is_empty() {
        println!("  {}", "no insertions found in history".yellow());
    }
    for contributor in metadata.contributors.top(SUMMARY_CONTRIBUTORS) {
        println!(
            "  {:>8}  {}",
            contributor.lines.to_string().bright_green(),
            contributor.name
        );
    }

    reporter.generate_report(&metadata).await?;

    println!(
        "\n{} {}",
        "Generated".bright_green().bold(),
        reporter.output_path().display()
    );

    Ok(())
}
