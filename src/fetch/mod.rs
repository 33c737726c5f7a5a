//! HTTP fetcher for streaming resources to disk.
//!
//! This module provides functionality for downloading the catalog listing
//! and the individual sheet PDFs with streaming support, plus the URL to
//! filename derivation the pipeline names downloads with.
//!
//! # Features
//!
//! - Streaming downloads (memory-efficient for large files)
//! - Skip-if-exists semantics: an existing destination is never overwritten,
//!   making repeated runs safe
//! - Configurable timeouts (30s connect, 5min read by default)
//! - Structured error types with full context

mod client;
mod constants;
mod error;
mod filename;

pub use client::{FetchOutcome, HttpClient};
pub use constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
pub use error::FetchError;
pub use filename::derive_filename;
