//! Pipeline orchestrator for a single ingest run.
//!
//! Sequences the full pipeline: fetch the catalog listing into its cache,
//! extract the marked PDF links, fetch each sheet into the output
//! directory, then clean the directory up (delete structurally invalid
//! PDFs, lowercase the surviving filenames).
//!
//! Failure policy: anything that makes the rest of the run impossible —
//! the listing fetch, the cache read, link extraction — aborts with a
//! [`PipelineError`]. Every per-item failure (one sheet's fetch, validate,
//! delete, or rename) is logged, counted, and skipped so one bad resource
//! never sacrifices the rest of the batch.
//!
//! Execution is strictly sequential: one fetch, one validation, one rename
//! at a time. Re-running is safe — fetches skip existing files and the
//! cleanup pass is idempotent.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{info, warn};
use url::Url;

use crate::config::IngestConfig;
use crate::extract::{ExtractError, extract_pdf_links};
use crate::fetch::{FetchError, FetchOutcome, HttpClient, derive_filename};
use crate::normalize::{NormalizeOutcome, normalize_filename};
use crate::scan::scan_for_extension;
use crate::validate::validate_pdf;

/// Errors that abort a run.
///
/// Per-item failures are never surfaced here; they are logged and counted
/// in [`RunStats`] instead.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The catalog listing could not be fetched; nothing downstream can run.
    #[error("failed to fetch catalog listing {url}: {source}")]
    Listing {
        /// The catalog URL.
        url: String,
        /// The underlying fetch failure.
        #[source]
        source: FetchError,
    },

    /// The cached listing could not be read back from disk.
    #[error("failed to read cached listing {path}: {source}")]
    ReadCache {
        /// The cache file path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Link extraction failed.
    #[error("failed to extract links from listing: {0}")]
    Extract(#[from] ExtractError),
}

/// Live counters for a run.
///
/// Uses atomic counters so the binary's progress UI can poll them while
/// the run is in flight.
#[derive(Debug, Default)]
pub struct RunStats {
    links_found: AtomicUsize,
    downloaded: AtomicUsize,
    already_present: AtomicUsize,
    fetch_failed: AtomicUsize,
    invalid_removed: AtomicUsize,
    renamed: AtomicUsize,
    rename_conflicts: AtomicUsize,
}

impl RunStats {
    /// Creates a new stats tracker with zero counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of PDF links found on the listing page.
    #[must_use]
    pub fn links_found(&self) -> usize {
        self.links_found.load(Ordering::SeqCst)
    }

    /// Number of sheets downloaded this run.
    #[must_use]
    pub fn downloaded(&self) -> usize {
        self.downloaded.load(Ordering::SeqCst)
    }

    /// Number of sheets skipped because they were already on disk.
    #[must_use]
    pub fn already_present(&self) -> usize {
        self.already_present.load(Ordering::SeqCst)
    }

    /// Number of sheet fetches that failed.
    #[must_use]
    pub fn fetch_failed(&self) -> usize {
        self.fetch_failed.load(Ordering::SeqCst)
    }

    /// Number of links processed so far (downloaded + present + failed).
    #[must_use]
    pub fn processed(&self) -> usize {
        self.downloaded() + self.already_present() + self.fetch_failed()
    }

    /// Number of invalid files deleted by the cleanup pass.
    #[must_use]
    pub fn invalid_removed(&self) -> usize {
        self.invalid_removed.load(Ordering::SeqCst)
    }

    /// Number of files renamed to their lowercase form.
    #[must_use]
    pub fn renamed(&self) -> usize {
        self.renamed.load(Ordering::SeqCst)
    }

    /// Number of renames skipped because the lowercase target existed.
    #[must_use]
    pub fn rename_conflicts(&self) -> usize {
        self.rename_conflicts.load(Ordering::SeqCst)
    }

    fn set_links_found(&self, count: usize) {
        self.links_found.store(count, Ordering::SeqCst);
    }

    fn record_downloaded(&self) {
        self.downloaded.fetch_add(1, Ordering::SeqCst);
    }

    fn record_already_present(&self) {
        self.already_present.fetch_add(1, Ordering::SeqCst);
    }

    fn record_fetch_failed(&self) {
        self.fetch_failed.fetch_add(1, Ordering::SeqCst);
    }

    fn record_invalid_removed(&self) {
        self.invalid_removed.fetch_add(1, Ordering::SeqCst);
    }

    fn record_renamed(&self) {
        self.renamed.fetch_add(1, Ordering::SeqCst);
    }

    fn record_rename_conflict(&self) {
        self.rename_conflicts.fetch_add(1, Ordering::SeqCst);
    }

    /// Snapshots the counters into a plain summary.
    #[must_use]
    pub fn snapshot(&self) -> RunSummary {
        RunSummary {
            links_found: self.links_found(),
            downloaded: self.downloaded(),
            already_present: self.already_present(),
            fetch_failed: self.fetch_failed(),
            invalid_removed: self.invalid_removed(),
            renamed: self.renamed(),
            rename_conflicts: self.rename_conflicts(),
        }
    }
}

/// Final counts for a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// PDF links found on the listing page.
    pub links_found: usize,
    /// Sheets downloaded this run.
    pub downloaded: usize,
    /// Sheets already on disk and skipped.
    pub already_present: usize,
    /// Sheet fetches that failed.
    pub fetch_failed: usize,
    /// Invalid files deleted.
    pub invalid_removed: usize,
    /// Files renamed to lowercase.
    pub renamed: usize,
    /// Renames skipped on conflict.
    pub rename_conflicts: usize,
}

/// Orchestrates one ingest run over a fixed configuration.
#[derive(Debug)]
pub struct Pipeline {
    config: IngestConfig,
    client: HttpClient,
    stats: Arc<RunStats>,
}

impl Pipeline {
    /// Creates a pipeline with a default HTTP client.
    #[must_use]
    pub fn new(config: IngestConfig) -> Self {
        Self::with_client(config, HttpClient::new())
    }

    /// Creates a pipeline with an explicit HTTP client (custom timeouts).
    #[must_use]
    pub fn with_client(config: IngestConfig, client: HttpClient) -> Self {
        Self {
            config,
            client,
            stats: Arc::new(RunStats::new()),
        }
    }

    /// Returns a handle to the live run counters.
    #[must_use]
    pub fn stats(&self) -> Arc<RunStats> {
        Arc::clone(&self.stats)
    }

    /// Executes one full run: listing → links → sheets → cleanup.
    ///
    /// Partial completion is an acceptable terminal state of an interrupted
    /// run; re-running picks up where it left off via skip-if-exists.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] only for failures that make the rest of
    /// the run impossible (listing fetch, cache read, extraction).
    pub async fn run(&self) -> Result<RunSummary, PipelineError> {
        let listing = self.fetch_listing().await?;

        let links = extract_pdf_links(
            &listing,
            &self.config.marker_class,
            &self.config.pdf_extension,
        )?;
        self.stats.set_links_found(links.len());
        info!(links = links.len(), "extracted sheet links from listing");

        self.fetch_sheets(&links).await;
        self.clean_output();

        let summary = self.stats.snapshot();
        info!(
            downloaded = summary.downloaded,
            already_present = summary.already_present,
            fetch_failed = summary.fetch_failed,
            invalid_removed = summary.invalid_removed,
            renamed = summary.renamed,
            rename_conflicts = summary.rename_conflicts,
            "run complete"
        );
        Ok(summary)
    }

    /// Fetches the listing into its cache (at most once ever, unless the
    /// cache file is deleted) and reads it back.
    async fn fetch_listing(&self) -> Result<String, PipelineError> {
        let url = &self.config.catalog_url;
        let cache = &self.config.cache_path;

        match self.client.fetch_to_path(url, cache).await {
            Ok(FetchOutcome::Downloaded { bytes }) => {
                info!(url = %url, bytes, "fetched catalog listing");
            }
            Ok(FetchOutcome::AlreadyPresent) => {
                info!(path = %cache.display(), "listing cache present, skipping fetch");
            }
            Err(source) => {
                return Err(PipelineError::Listing {
                    url: url.clone(),
                    source,
                });
            }
        }

        tokio::fs::read_to_string(cache)
            .await
            .map_err(|source| PipelineError::ReadCache {
                path: cache.clone(),
                source,
            })
    }

    /// Fetches every extracted link into the output directory, in order.
    async fn fetch_sheets(&self, links: &[String]) {
        let total = links.len();
        let base = Url::parse(&self.config.catalog_url).ok();

        for (index, href) in links.iter().enumerate() {
            let position = index + 1;

            let Some(resolved) = resolve_link(base.as_ref(), href) else {
                warn!(href = %href, "link cannot be resolved against the catalog URL, skipping");
                self.stats.record_fetch_failed();
                continue;
            };

            let filename = derive_filename(resolved.as_str());
            let dest = self.config.output_dir.join(&filename);
            info!(position, total, url = %resolved, "fetching sheet");

            match self.client.fetch_to_path(resolved.as_str(), &dest).await {
                Ok(FetchOutcome::Downloaded { bytes }) => {
                    info!(position, total, path = %dest.display(), bytes, "sheet downloaded");
                    self.stats.record_downloaded();
                }
                Ok(FetchOutcome::AlreadyPresent) => {
                    info!(position, total, path = %dest.display(), "sheet already present");
                    self.stats.record_already_present();
                }
                Err(error) => {
                    warn!(position, total, url = %resolved, error = %error, "sheet fetch failed, continuing");
                    self.stats.record_fetch_failed();
                }
            }
        }
    }

    /// Validates every PDF in the output directory, deleting the invalid
    /// ones and lowercasing the names of the survivors.
    fn clean_output(&self) {
        let files = match scan_for_extension(&self.config.output_dir, &self.config.pdf_extension)
        {
            Ok(files) => files,
            Err(error) => {
                warn!(error = %error, "output scan failed, skipping cleanup pass");
                return;
            }
        };
        info!(files = files.len(), "cleaning output directory");

        for path in files {
            if let Err(reason) = validate_pdf(&path) {
                warn!(path = %path.display(), reason = %reason, "removing invalid sheet");
                match std::fs::remove_file(&path) {
                    Ok(()) => self.stats.record_invalid_removed(),
                    Err(error) => {
                        warn!(path = %path.display(), error = %error, "failed to remove invalid sheet");
                    }
                }
                continue;
            }

            match normalize_filename(&path) {
                Ok(NormalizeOutcome::AlreadyCanonical) => {}
                Ok(NormalizeOutcome::Renamed(target)) => {
                    info!(from = %path.display(), to = %target.display(), "normalized sheet filename");
                    self.stats.record_renamed();
                }
                Ok(NormalizeOutcome::SkippedConflict(_)) => {
                    self.stats.record_rename_conflict();
                }
                Err(error) => {
                    warn!(path = %path.display(), error = %error, "rename failed, leaving file in place");
                }
            }
        }
    }
}

/// Resolves an extracted href to an absolute URL, joining relative links
/// against the catalog base.
fn resolve_link(base: Option<&Url>, href: &str) -> Option<Url> {
    match Url::parse(href) {
        Ok(url) => Some(url),
        Err(_) => base?.join(href).ok(),
    }
}
