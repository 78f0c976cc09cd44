use serde::{Deserialize, Serialize};

/// Link-preview metadata extracted from a fetched page.
///
/// All fields except `url` are optional — a page may have no usable tags,
/// and `domain` is absent only when `url` itself does not parse. Records
/// are built fresh per fetch, never cached or mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkMetadata {
    /// The input URL, byte-for-byte — never a redirect target.
    pub url: String,
    pub title: Option<String>,
    pub site_name: Option<String>,
    /// Always an absolute URL when present; relative candidates are
    /// resolved against `url` before being accepted.
    pub image_url: Option<String>,
    pub domain: Option<String>,
}
