//! PDF link extraction from the catalog listing HTML.
//!
//! The listing page marks its download links with a fixed anchor class.
//! Extraction collects the `href` of every marked anchor whose lowercased
//! value ends in the PDF extension, in document order. Parsing is lenient:
//! malformed HTML is recovered by the underlying html5ever parser and can
//! never fail the run.

use scraper::{Html, Selector};
use thiserror::Error;
use tracing::trace;

/// Errors that can occur during link extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The marker class does not form a valid CSS selector.
    #[error("invalid link selector {selector}: {message}")]
    Selector {
        /// The selector that failed to parse.
        selector: String,
        /// Parser diagnostic.
        message: String,
    },
}

impl ExtractError {
    fn selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.into(),
        }
    }
}

/// Extracts PDF resource links from the listing HTML.
///
/// Returns the `href` values of anchors carrying `marker_class` whose
/// lowercased value ends with `extension`, in document order. Values are
/// returned verbatim — they may be absolute or relative; resolution against
/// the catalog base is the caller's concern. Duplicates are not collapsed.
///
/// # Errors
///
/// Returns [`ExtractError::Selector`] if `marker_class` does not form a
/// valid CSS class selector.
pub fn extract_pdf_links(
    html: &str,
    marker_class: &str,
    extension: &str,
) -> Result<Vec<String>, ExtractError> {
    let selector_source = format!("a.{marker_class}");
    let selector = Selector::parse(&selector_source)
        .map_err(|e| ExtractError::selector(&selector_source, e.to_string()))?;

    let document = Html::parse_document(html);
    let suffix = extension.to_lowercase();

    let mut links = Vec::new();
    for anchor in document.select(&selector) {
        let Some(href) = anchor.value().attr("href") else {
            trace!("marked anchor without href, skipping");
            continue;
        };
        if href.to_lowercase().ends_with(&suffix) {
            links.push(href.to_string());
        } else {
            trace!(href, "marked anchor without pdf suffix, skipping");
        }
    }
    Ok(links)
}
