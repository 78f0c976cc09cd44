//! Link metadata pipeline: URL detection, support filtering, and
//! Open Graph / Twitter Card scraping with URL-derived fallbacks.
//!
//! The three stages run in order: [`detect_url`] finds the first absolute
//! HTTP(S) URL in free-form text, [`is_metadata_supported`] decides whether
//! it is worth fetching, and [`MetadataFetcher::fetch`] retrieves the page
//! and extracts a [`LinkMetadata`](crate::models::LinkMetadata) record.
//! The filter is a caller-side optimization — the fetcher does not re-check
//! it, and remains usable standalone.

mod detect;
mod fetch;

pub use detect::{detect_url, extract_domain, is_metadata_supported};
pub use fetch::{extract_title_from_url, resolve_url, MetadataFetcher};

use std::time::Duration;

/// Default request timeout for metadata fetches. Overridable via
/// `FETCH_TIMEOUT_SECS` in configuration.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; EduTaskMap/1.0; +https://edutaskmap.com)";
