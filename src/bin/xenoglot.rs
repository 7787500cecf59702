//! Xenoglot CLI - WALS language weirdness analysis.
//!
//! Loads a WALS-style language table, runs the rarity/weirdness pipeline,
//! prints the console report, and writes the CSV/JSON exports.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use xenoglot_rs::io::{reports::ReportGenerator, wals};
use xenoglot_rs::{XenoglotConfig, XenoglotEngine};

#[derive(Parser)]
#[command(name = "xenoglot", version, about = "WALS language weirdness analysis")]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a language table and write weirdness reports
    Analyze(AnalyzeArgs),

    /// Print the default configuration as YAML
    PrintDefaultConfig,

    /// Validate a configuration file
    ValidateConfig(ValidateConfigArgs),
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Path to the WALS language CSV
    #[arg(default_value = "language.csv")]
    input: PathBuf,

    /// Directory for report files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Minimum feature count for the robust ranking subset
    #[arg(long)]
    min_features: Option<usize>,

    /// Number of languages in each ranking block
    #[arg(long)]
    top: Option<usize>,

    /// Configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip writing report files, print the console summary only
    #[arg(long)]
    no_reports: bool,
}

#[derive(Args)]
struct ValidateConfigArgs {
    /// Configuration file to validate
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Analyze(args) => analyze_command(args),
        Commands::PrintDefaultConfig => print_default_config(),
        Commands::ValidateConfig(args) => validate_config(args),
    }
}

fn analyze_command(args: AnalyzeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => XenoglotConfig::from_yaml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => XenoglotConfig::default(),
    };

    if let Some(output_dir) = args.output_dir {
        config.io.output_dir = output_dir;
    }
    if let Some(min_features) = args.min_features {
        config.scoring.min_features = min_features;
    }
    if let Some(top) = args.top {
        config.scoring.ranking_size = top;
    }

    let dataset = wals::load_dataset(&args.input, &config.dataset)
        .with_context(|| format!("loading dataset {}", args.input.display()))?;

    let engine = XenoglotEngine::new(config.clone())?;
    let results = engine.analyze(&dataset)?;

    let generator = ReportGenerator::new(config);
    generator.render_console(&results);

    if !args.no_reports {
        let paths = generator.write_all(&results)?;
        println!();
        for path in paths {
            println!("  wrote {}", path.display());
        }
    }

    Ok(())
}

fn print_default_config() -> anyhow::Result<()> {
    let config = XenoglotConfig::default();
    print!("{}", serde_yaml::to_string(&config)?);
    Ok(())
}

fn validate_config(args: ValidateConfigArgs) -> anyhow::Result<()> {
    let config = XenoglotConfig::from_yaml_file(&args.config)
        .with_context(|| format!("loading config {}", args.config.display()))?;
    config.validate()?;
    println!("Configuration OK: {}", args.config.display());
    Ok(())
}
