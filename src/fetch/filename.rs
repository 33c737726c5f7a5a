//! Filename derivation from resource URLs.
//!
//! Local sheet filenames come from the final segment of the URL's path
//! component, percent-decoded and sanitized. Query strings and fragments
//! never influence the result, so derivation is a pure function of the URL
//! and repeated runs resolve the same resource to the same local path.

use sha2::{Digest, Sha256};
use url::Url;

/// Derives the local filename for a resource URL.
///
/// The final path segment is percent-decoded and sanitized for filesystem
/// safety. When the URL has no usable segment (trailing slash, bare host,
/// or a segment that sanitizes away entirely), a deterministic
/// `sheet-<hash>.pdf` fallback derived from the full URL is used instead,
/// so skip-if-exists dedup still holds across runs.
#[must_use]
pub fn derive_filename(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return hashed_fallback(url);
    };

    if let Some(mut segments) = parsed.path_segments()
        && let Some(last) = segments.next_back()
        && !last.is_empty()
    {
        let decoded = urlencoding::decode(last).unwrap_or_else(|_| last.into());
        let sanitized = sanitize_filename(&decoded);
        if !sanitized.trim_matches('_').is_empty() {
            return sanitized;
        }
    }

    hashed_fallback(url)
}

/// Deterministic fallback name: first 16 hex chars of SHA-256 over the URL.
fn hashed_fallback(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    let hex: String = digest.iter().take(8).map(|byte| format!("{byte:02x}")).collect();
    format!("sheet-{hex}.pdf")
}

/// Sanitizes a filename for filesystem safety.
///
/// Replaces characters that are invalid on common filesystems
/// (`/ \ : * ? " < > |` and control characters) with underscores.
/// Dot-only segments are rejected so a derived name can never escape
/// the output directory.
pub(crate) fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if matches!(sanitized.as_str(), "." | "..") {
        return String::new();
    }
    sanitized
}
