use anyhow::{Context, Result};
use estate_agent::cli::CommandLine;
use estate_agent::loaders::{ListingSource, TextFileLoader};
use estate_agent::report::{ConsoleSink, FanOut, FileSink};
use estate_agent::Report;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let cli = CommandLine::parse_args();

    // Initialize logging
    init_logging(cli.log_file.as_deref())?;

    info!("🏠 Estate Agent - listing valuation report");

    let loader = TextFileLoader::with_options(&cli.input, cli.load_options());
    let outcome = loader
        .load()
        .with_context(|| format!("Failed to load listings from {}", cli.input.display()))?;

    let summary = &outcome.summary;
    if !summary.skipped.is_empty() {
        warn!(
            "{} of {} records were malformed and skipped",
            summary.skipped.len(),
            summary.records
        );
    }
    info!(
        "✅ Cataloged {} listings from {}",
        outcome.catalog.len(),
        loader.source_name()
    );

    let report = Report::generate(&outcome.catalog).context("Failed to generate report")?;

    let mut sinks = FanOut::new();
    if !cli.quiet {
        sinks.push(ConsoleSink);
    }
    if let Some(path) = &cli.output {
        let sink = FileSink::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        sinks.push(sink);
    }
    if !sinks.is_empty() {
        report
            .write_to(&mut sinks)
            .context("Failed to write report")?;
    }
    if let Some(path) = &cli.output {
        info!("💾 Saved report to {}", path.display());
    }

    if let Some(path) = &cli.json {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        info!("💾 Saved JSON report to {}", path.display());
    }

    Ok(())
}

/// Console logging on stderr filtered by `RUST_LOG` (default `info`), plus
/// an optional plain-text log file that keeps debug output.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let file = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .with_filter(LevelFilter::DEBUG),
            )
        }
        None => None,
    };

    tracing_subscriber::registry().with(console).with(file).init();
    Ok(())
}
