//! Recursive enumeration of downloaded files by extension.

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

/// Errors that can occur while scanning the output directory.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The directory walk failed (permissions, broken symlink loop, etc.)
    #[error("failed to walk {root}: {source}")]
    Walk {
        /// The root being scanned.
        root: PathBuf,
        /// The underlying walk error.
        #[source]
        source: walkdir::Error,
    },
}

/// Recursively collects files under `root` whose name ends with `extension`.
///
/// The suffix match is case-insensitive so sheets saved with an uppercase
/// `.PDF` name still reach validation and normalization. Order of the
/// returned paths is unspecified. A missing root yields an empty listing —
/// a run that downloaded nothing has nothing to clean.
///
/// # Errors
///
/// Returns [`ScanError::Walk`] if a directory entry cannot be read.
pub fn scan_for_extension(root: &Path, extension: &str) -> Result<Vec<PathBuf>, ScanError> {
    if !root.exists() {
        return Ok(Vec::new());
    }

    let suffix = extension.to_lowercase();
    let mut found = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|source| ScanError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if name.to_lowercase().ends_with(&suffix) {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"x").unwrap();
        path
    }

    #[test]
    fn test_scan_finds_matching_files() {
        let dir = TempDir::new().unwrap();
        let a = touch(dir.path(), "a.pdf");
        let b = touch(dir.path(), "b.pdf");
        touch(dir.path(), "notes.txt");

        let mut found = scan_for_extension(dir.path(), ".pdf").unwrap();
        found.sort();
        let mut expected = vec![a, b];
        expected.sort();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_scan_recurses_into_subdirectories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("deep").join("deeper");
        std::fs::create_dir_all(&nested).unwrap();
        let inner = touch(&nested, "inner.pdf");

        let found = scan_for_extension(dir.path(), ".pdf").unwrap();
        assert_eq!(found, vec![inner]);
    }

    #[test]
    fn test_scan_matches_uppercase_extension() {
        let dir = TempDir::new().unwrap();
        let upper = touch(dir.path(), "Sheet1.PDF");

        let found = scan_for_extension(dir.path(), ".pdf").unwrap();
        assert_eq!(found, vec![upper]);
    }

    #[test]
    fn test_scan_skips_directories_with_matching_names() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("folder.pdf")).unwrap();

        let found = scan_for_extension(dir.path(), ".pdf").unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_scan_missing_root_returns_empty() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nowhere");
        let found = scan_for_extension(&missing, ".pdf").unwrap();
        assert!(found.is_empty());
    }
}
