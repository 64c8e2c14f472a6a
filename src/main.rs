use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use incdep::core::{AnalyzerOptions, CodebaseAnalyzer, IncludeReport};
use incdep::formatters::{JsonCompactFormatter, TreeFormatter};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "incdep",
    version,
    author = "incdep developers",
    about = "Prints the include tree of every C++ file in a project and how often each header is included"
)]
struct Cli {
    /// Project root to analyze
    #[arg(short, long, value_name = "PATH")]
    input: PathBuf,

    /// Additional include search directory, searched in the given order
    #[arg(short = 'I', long = "include-dir", value_name = "DIR")]
    include_dirs: Vec<PathBuf>,

    /// Output format: tree, json-compact
    #[arg(short, long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Tree)]
    format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Number of root files walked in parallel
    #[arg(short, long, value_name = "N", default_value_t = 1)]
    jobs: usize,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum OutputFormat {
    Tree,
    JsonCompact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("incdep={level}")));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        input,
        include_dirs,
        format,
        output,
        jobs,
        verbose: _,
    } = cli;

    let start_time = Instant::now();
    tracing::info!("Project root: {}", input.display());
    for dir in &include_dirs {
        tracing::debug!("Include directory: {}", dir.display());
    }

    let analyzer = CodebaseAnalyzer::new(
        AnalyzerOptions::new()
            .with_include_dirs(include_dirs)
            .with_jobs(jobs),
    );
    let report = analyzer
        .analyze(&input)
        .with_context(|| format!("Failed to analyze {}", input.display()))?;

    write_report(&report, format, output.as_ref())?;

    tracing::info!(
        "Total execution time: {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

fn write_report(
    report: &IncludeReport,
    format: OutputFormat,
    output: Option<&PathBuf>,
) -> Result<()> {
    match (format, output) {
        (OutputFormat::Tree, Some(path)) => TreeFormatter::new()
            .format_to_file(report, path)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        (OutputFormat::Tree, None) => {
            TreeFormatter::new().write_report(report, &mut io::stdout().lock())?
        }
        (OutputFormat::JsonCompact, Some(path)) => JsonCompactFormatter::new()
            .format_to_file(report, path)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        (OutputFormat::JsonCompact, None) => {
            JsonCompactFormatter::new().write_report(report, &mut io::stdout().lock())?
        }
    }

    if let Some(path) = output {
        tracing::info!("Report written to {}", path.display());
    }
    Ok(())
}
