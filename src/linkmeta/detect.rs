use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Matches an absolute HTTP(S) URL candidate in free-form text. The
/// character class excludes whitespace and the characters that are invalid
/// in bare URLs and commonly appear as surrounding punctuation or markup.
static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)https?://[^\s<>"{}|\\^`\[\]]+"#).expect("URL regex must compile")
});

/// File extensions that typically serve binary downloads rather than HTML.
const SKIP_EXTENSIONS: &[&str] = &[
    ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".zip", ".rar", ".7z", ".tar",
    ".gz",
];

/// Schemes that can never carry page metadata.
const SKIP_SCHEMES: &[&str] = &["mailto:", "tel:", "ftp:"];

/// Find the first absolute HTTP(S) URL in `text`.
///
/// Only the first candidate is validated: if it matches the URL pattern but
/// fails to parse as a URL with an authority, the whole scan gives up
/// rather than trying later candidates. Later URLs in the text are ignored
/// either way.
pub fn detect_url(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    let candidate = URL_REGEX.find(text)?.as_str();
    let parsed = Url::parse(candidate).ok()?;
    if parsed.host_str().is_none() {
        return None;
    }

    Some(candidate.to_string())
}

/// Hostname of `url`, or `None` if it does not parse.
pub fn extract_domain(url: &str) -> Option<String> {
    if url.is_empty() {
        return None;
    }

    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
}

/// Whether `url` is likely to serve an HTML page with metadata.
///
/// Filters out known binary-download extensions and non-web schemes.
/// Pure predicate, no I/O.
pub fn is_metadata_supported(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    let Ok(parsed) = Url::parse(url) else {
        return false;
    };

    let path = parsed.path().to_lowercase();
    if SKIP_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        return false;
    }

    let lower = url.to_lowercase();
    if SKIP_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
        return false;
    }

    true
}
