//! Run configuration for the ingest pipeline.
//!
//! The catalog URL, cache path, output directory, and extraction markers
//! are carried in an explicit struct handed to the orchestrator, so tests
//! can substitute a mock server and scratch directories without touching
//! any global state.

use std::path::PathBuf;

/// Production catalog listing URL.
pub const DEFAULT_CATALOG_URL: &str = "https://simplegreen.com/data-sheets/";

/// Local cache file for the fetched listing HTML.
pub const DEFAULT_CACHE_FILE: &str = "simplegreen-com.html";

/// Output directory for downloaded sheets.
pub const DEFAULT_OUTPUT_DIR: &str = "PDFs";

/// Anchor class identifying download links on the listing page.
pub const DEFAULT_MARKER_CLASS: &str = "sds_download_btn";

/// Extension suffix a download link must carry (matched case-insensitively).
pub const DEFAULT_PDF_EXTENSION: &str = ".pdf";

/// Configuration for a single ingest run.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// URL of the catalog listing page.
    pub catalog_url: String,
    /// Where the fetched listing HTML is cached on disk.
    pub cache_path: PathBuf,
    /// Directory downloaded sheets are written into.
    pub output_dir: PathBuf,
    /// Anchor class marking download links.
    pub marker_class: String,
    /// Extension suffix a link and a local file must carry.
    pub pdf_extension: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            cache_path: PathBuf::from(DEFAULT_CACHE_FILE),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            marker_class: DEFAULT_MARKER_CLASS.to_string(),
            pdf_extension: DEFAULT_PDF_EXTENSION.to_string(),
        }
    }
}
