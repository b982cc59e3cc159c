use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::*;
use std::path::PathBuf;

use fitstats::config::AppConfig;
use fitstats::logging::{init_logging, LogFormat};
use fitstats::report::{render, OutputFormat};
use fitstats::{process_packages, PackageSource};

/// fitstats - Workout statistics from raw sensor packages
///
/// Reads (type code, raw data) packages, computes distance, mean speed and
/// calories for each, and prints one summary per workout.
#[derive(Parser)]
#[command(name = "fitstats")]
#[command(author = "fitstats Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Workout statistics CLI", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Package file (CSV or JSON); the demo packages are used if omitted
    #[arg(short, long, value_name = "FILE")]
    packages: Option<PathBuf>,

    /// Output format (text, json, table)
    #[arg(short = 'f', long)]
    format: Option<OutputFormat>,

    /// Log format (pretty, json, compact)
    #[arg(long)]
    log_format: Option<LogFormat>,

    /// Increase verbosity of log output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::resolve(cli.config.as_deref())?;

    // Command line overrides config file
    config.logging.level = config.logging.level.raised_by(cli.verbose);
    if let Some(log_format) = cli.log_format {
        config.logging.format = log_format;
    }
    let format = cli.format.unwrap_or(config.output.format);

    init_logging(&config.logging)?;

    let source = match cli.packages.or(config.input.packages) {
        Some(path) => PackageSource::File(path),
        None => PackageSource::Demo,
    };

    let packages = source
        .load()
        .with_context(|| format!("Failed to load packages from {}", source))?;
    let outcome = process_packages(&packages);

    for line in render(&outcome.messages, format)? {
        println!("{}", line);
    }

    for failure in &outcome.failures {
        eprintln!(
            "{} package #{} ({}): {}",
            "✗ Skipped".red().bold(),
            failure.index + 1,
            failure.workout_type,
            failure.error.user_message()
        );
    }

    if outcome.all_failed() {
        bail!("None of the {} packages could be processed", outcome.total());
    }

    Ok(())
}
