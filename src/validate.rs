//! Structural PDF validity check.
//!
//! A downloaded sheet is kept only if it opens as a PDF and reports at
//! least one page. This is a structural check — content integrity beyond
//! "openable and non-empty" is out of scope.

use std::path::{Path, PathBuf};

use lopdf::Document;
use thiserror::Error;

/// Reasons a local file fails the structural validity check.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The file could not be opened as a PDF document.
    #[error("{path} is not a readable PDF: {source}")]
    Unreadable {
        /// The file that failed to open.
        path: PathBuf,
        /// The underlying parse failure.
        #[source]
        source: lopdf::Error,
    },

    /// The document opened but contains no pages.
    #[error("{path} opened as a PDF but has no pages")]
    NoPages {
        /// The empty document.
        path: PathBuf,
    },
}

/// Checks that the file at `path` is a structurally valid PDF.
///
/// Valid means: `lopdf` can load the document and it reports at least one
/// page. Zero-length files, truncated downloads, and HTML error pages
/// saved with a `.pdf` name all fail the load and come back as
/// [`ValidationError::Unreadable`].
///
/// # Errors
///
/// Returns the specific failure so the caller can log it before deleting
/// the file.
pub fn validate_pdf(path: &Path) -> Result<(), ValidationError> {
    let document = Document::load(path).map_err(|source| ValidationError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    if document.get_pages().is_empty() {
        return Err(ValidationError::NoPages {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use lopdf::{Object, Stream, dictionary};
    use tempfile::TempDir;

    /// Builds a minimal valid PDF with `page_count` pages using lopdf itself,
    /// so the bytes are guaranteed loadable by the same library.
    fn build_pdf(page_count: usize) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let mut kids = Vec::new();
        let mut page_ids = Vec::new();
        for index in 0..page_count {
            let content = format!("BT /F1 12 Tf 72 720 Td (Page {index}) Tj ET");
            let stream = Stream::new(dictionary! {}, content.into_bytes());
            let content_id = doc.add_object(stream);
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ],
                "Contents" => Object::Reference(content_id),
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => Object::Reference(font_id) },
                },
            });
            kids.push(Object::Reference(page_id));
            page_ids.push(page_id);
        }

        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(i64::try_from(page_count).unwrap()),
        });

        for page_id in page_ids {
            if let Ok(page_obj) = doc.get_object_mut(page_id)
                && let Ok(dict) = page_obj.as_dict_mut()
            {
                dict.set("Parent", Object::Reference(pages_id));
            }
        }

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    fn write_file(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_single_page_pdf_is_valid() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "one.pdf", &build_pdf(1));
        assert!(validate_pdf(&path).is_ok());
    }

    #[test]
    fn test_multi_page_pdf_is_valid() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "three.pdf", &build_pdf(3));
        assert!(validate_pdf(&path).is_ok());
    }

    #[test]
    fn test_zero_page_pdf_is_invalid() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "empty-tree.pdf", &build_pdf(0));
        assert!(matches!(
            validate_pdf(&path),
            Err(ValidationError::NoPages { .. })
        ));
    }

    #[test]
    fn test_zero_length_file_is_invalid() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "empty.pdf", b"");
        assert!(matches!(
            validate_pdf(&path),
            Err(ValidationError::Unreadable { .. })
        ));
    }

    #[test]
    fn test_non_pdf_bytes_are_invalid() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "fake.pdf", b"<html>not found</html>");
        assert!(matches!(
            validate_pdf(&path),
            Err(ValidationError::Unreadable { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nowhere.pdf");
        assert!(matches!(
            validate_pdf(&path),
            Err(ValidationError::Unreadable { .. })
        ));
    }

    #[test]
    fn test_error_display_names_the_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "fake.pdf", b"garbage");
        let error = validate_pdf(&path).unwrap_err();
        assert!(error.to_string().contains("fake.pdf"));
    }
}
