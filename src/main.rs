//! CLI entry point for the sds-ingest tool.

use std::io::{self, IsTerminal};
use std::sync::atomic::Ordering;

use anyhow::Result;
use clap::Parser;
use sds_ingest_core::Pipeline;
use tracing::{debug, info};

mod cli;
mod progress;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");
    info!("sds-ingest starting");

    let config = args.to_config();
    let pipeline = Pipeline::new(config);

    // Spinner only on an interactive terminal and when logs stay at info
    let use_spinner =
        !args.no_progress && !args.quiet && args.verbose == 0 && io::stderr().is_terminal();
    let (handle, stop) = progress::spawn_progress_ui(use_spinner, pipeline.stats());

    let result = pipeline.run().await;

    stop.store(true, Ordering::SeqCst);
    if let Some(handle) = handle {
        let _ = handle.await;
    }

    let summary = result?;
    info!(
        links = summary.links_found,
        downloaded = summary.downloaded,
        already_present = summary.already_present,
        fetch_failed = summary.fetch_failed,
        invalid_removed = summary.invalid_removed,
        renamed = summary.renamed,
        rename_conflicts = summary.rename_conflicts,
        "Ingest complete"
    );

    Ok(())
}
