//! Shared User-Agent string for the ingest HTTP client.
//!
//! Single source for project URL and UA format so catalog and sheet
//! traffic stay consistent and easy to update (good citizenship; RFC 9308).

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/fierce/sds-ingest";

/// Default User-Agent for ingest requests (identifies the tool).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("sds-ingest/{version} (datasheet-ingest-tool; +{PROJECT_UA_URL})")
}
