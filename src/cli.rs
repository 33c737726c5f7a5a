//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use sds_ingest_core::IngestConfig;

/// Ingest a vendor's data-sheet PDF catalog.
///
/// Fetches the catalog listing page, downloads every marked PDF into the
/// output directory, then removes unreadable PDFs and lowercases the
/// remaining filenames. Safe to re-run: existing files are never
/// re-fetched or overwritten.
#[derive(Parser, Debug)]
#[command(name = "sds-ingest")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Catalog listing URL to ingest
    #[arg(long)]
    pub catalog_url: Option<String>,

    /// Local cache file for the listing HTML
    #[arg(long)]
    pub cache_file: Option<PathBuf>,

    /// Directory downloaded sheets are written into
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// Disable the progress spinner
    #[arg(long)]
    pub no_progress: bool,
}

impl Args {
    /// Builds the run configuration, applying CLI overrides over defaults.
    pub fn to_config(&self) -> IngestConfig {
        let mut config = IngestConfig::default();
        if let Some(url) = &self.catalog_url {
            config.catalog_url.clone_from(url);
        }
        if let Some(cache) = &self.cache_file {
            config.cache_path.clone_from(cache);
        }
        if let Some(output) = &self.output_dir {
            config.output_dir.clone_from(output);
        }
        config
    }
}
