//! Lowercase filename canonicalization.
//!
//! A filename is canonical iff it contains no uppercase code point. The
//! normalizer renames non-canonical files in place, keeping the directory
//! untouched. When the lowercase target already exists the rename is
//! skipped and logged rather than overwriting — both files are left as
//! they are.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while normalizing a filename.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The rename itself failed.
    #[error("failed to rename {from} to {to}: {source}")]
    Rename {
        /// Original path.
        from: PathBuf,
        /// Lowercase target path.
        to: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Result of a normalization attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeOutcome {
    /// The filename was already all-lowercase; nothing was done.
    AlreadyCanonical,
    /// The file was renamed to its lowercase form.
    Renamed(PathBuf),
    /// The lowercase target already exists; the rename was skipped.
    SkippedConflict(PathBuf),
}

/// Renames the file at `path` to the lowercase form of its filename.
///
/// Only the filename is case-folded; the directory component is untouched.
/// An already-canonical name is a no-op. If a different file already sits
/// at the lowercase target, the rename is skipped (never overwritten) and
/// the conflict is reported as [`NormalizeOutcome::SkippedConflict`].
///
/// # Errors
///
/// Returns [`NormalizeError::Rename`] if the filesystem rename fails.
pub fn normalize_filename(path: &Path) -> Result<NormalizeOutcome, NormalizeError> {
    let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
        return Ok(NormalizeOutcome::AlreadyCanonical);
    };

    if !name.chars().any(char::is_uppercase) {
        return Ok(NormalizeOutcome::AlreadyCanonical);
    }

    let lowered = name.to_lowercase();
    let target = path.with_file_name(&lowered);

    if target.exists() {
        warn!(
            from = %path.display(),
            to = %target.display(),
            "lowercase target already exists, skipping rename"
        );
        return Ok(NormalizeOutcome::SkippedConflict(target));
    }

    std::fs::rename(path, &target).map_err(|source| NormalizeError::Rename {
        from: path.to_path_buf(),
        to: target.clone(),
        source,
    })?;
    debug!(from = %path.display(), to = %target.display(), "normalized filename");
    Ok(NormalizeOutcome::Renamed(target))
}
