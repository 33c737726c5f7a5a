//! HTTP client wrapper for fetching resources to disk.
//!
//! This module provides the `HttpClient` struct which handles streaming
//! fetches with skip-if-exists semantics, proper timeout configuration,
//! and error handling.

use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info};
use url::Url;

use super::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use super::error::FetchError;
use crate::user_agent;

/// Result of a single fetch operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The resource was downloaded and written to the destination.
    Downloaded {
        /// Number of body bytes written.
        bytes: u64,
    },
    /// A file already existed at the destination; nothing was fetched.
    AlreadyPresent,
}

/// HTTP client for fetching resources with streaming support.
///
/// This client is designed to be created once and reused for the listing
/// fetch and every sheet fetch of a run, taking advantage of connection
/// pooling.
///
/// # Example
///
/// ```no_run
/// use sds_ingest_core::fetch::HttpClient;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new();
/// let outcome = client
///     .fetch_to_path("https://example.com/sheet.pdf", Path::new("PDFs/sheet.pdf"))
///     .await?;
/// println!("outcome: {outcome:?}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a new HTTP client with default timeouts.
    ///
    /// Default configuration:
    /// - Connect timeout: 30 seconds
    /// - Read timeout: 5 minutes (for large files)
    /// - Gzip decompression: enabled
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new() -> Self {
        Self::new_with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a new HTTP client with explicit timeout values.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the supplied
    /// timeout configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new_with_timeouts(connect_timeout_secs: u64, read_timeout_secs: u64) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Fetches a URL to the given destination path, skipping existing files.
    ///
    /// 1. If a file already exists at `dest`, returns
    ///    [`FetchOutcome::AlreadyPresent`] without any network I/O — this is
    ///    the idempotency guarantee that makes repeated runs safe.
    /// 2. Otherwise issues a streaming GET, creates the destination's parent
    ///    directory if absent, and writes the body to `dest`.
    ///
    /// A fetch that fails mid-stream removes the partially written file, so
    /// a failed fetch never leaves a partial file behind. An existing file
    /// is never overwritten.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if:
    /// - The URL is invalid
    /// - The request fails (network error, timeout)
    /// - The server returns an error status (4xx, 5xx)
    /// - Writing to disk fails
    pub async fn fetch_to_path(
        &self,
        url: &str,
        dest: &Path,
    ) -> Result<FetchOutcome, FetchError> {
        if tokio::fs::try_exists(dest).await.unwrap_or(false) {
            debug!(path = %dest.display(), "file already present, skipping fetch");
            return Ok(FetchOutcome::AlreadyPresent);
        }

        // Validate URL before touching the network
        Url::parse(url).map_err(|_| FetchError::invalid_url(url))?;

        debug!(url = %url, "starting fetch");
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::timeout(url)
            } else {
                FetchError::network(url, e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::http_status(url, status.as_u16()));
        }

        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| FetchError::io(parent, e))?;
        }

        let mut file = File::create(dest)
            .await
            .map_err(|e| FetchError::io(dest, e))?;

        let stream_result = stream_to_file(&mut file, response, url, dest).await;
        if stream_result.is_err() {
            debug!(path = %dest.display(), "cleaning up partial file after error");
            let _ = tokio::fs::remove_file(dest).await;
        }
        let bytes = stream_result?;

        info!(path = %dest.display(), bytes, "fetch complete");
        Ok(FetchOutcome::Downloaded { bytes })
    }
}

/// Streams the response body to a file, returning bytes written.
///
/// Extracted so the caller can clean up the partial file on error.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    dest: &Path,
) -> Result<u64, FetchError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| FetchError::network(url, e))?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| FetchError::io(dest, e))?;
        bytes_written += chunk.len() as u64;
    }

    // Ensure all data is flushed to disk
    writer.flush().await.map_err(|e| FetchError::io(dest, e))?;

    Ok(bytes_written)
}
