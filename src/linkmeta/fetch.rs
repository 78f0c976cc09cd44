use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use thiserror::Error;
use url::Url;

use crate::linkmeta::{extract_domain, USER_AGENT};
use crate::models::LinkMetadata;

/// Extensions stripped from the path before deriving a fallback title.
/// `.aspx` is checked before `.asp` so the longer suffix wins.
const TITLE_EXTENSIONS: &[&str] = &[".html", ".htm", ".php", ".aspx", ".asp"];

#[derive(Debug, Error)]
enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(StatusCode),
}

/// Fetches pages and extracts link-preview metadata.
///
/// Holds a single shared `reqwest::Client` (connection-pooled, cheap to
/// clone) configured with the fetch timeout and browser-like headers that
/// reduce the chance of being blocked by basic bot filters. Redirects are
/// followed automatically; the returned record always carries the input
/// URL, never the redirect target.
pub struct MetadataFetcher {
    client: Client,
}

impl MetadataFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(MetadataFetcher { client })
    }

    /// Fetch `url` and extract metadata. Never fails: any network, status,
    /// or body error degrades to a record with a URL-derived title, the
    /// domain as site name, and no image.
    pub async fn fetch(&self, url: &str) -> LinkMetadata {
        let domain = extract_domain(url);

        match self.try_fetch(url).await {
            Ok(html) => extract_metadata(&html, url, domain),
            Err(e) => {
                tracing::warn!(error = %e, url = %url, "Metadata fetch failed, using URL-derived fallback");
                fallback_metadata(url, domain)
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(response.text().await?)
    }
}

/// Parse `html` and fill a metadata record via the fallback chains:
/// title from og:title → twitter:title → `<title>` → URL heuristic,
/// site name from og:site_name → application-name → domain,
/// image from og:image → twitter:image → first `<img>`, resolved absolute.
fn extract_metadata(html: &str, url: &str, domain: Option<String>) -> LinkMetadata {
    let document = Html::parse_document(html);

    let title = meta_content(&document, "og:title")
        .or_else(|| meta_content(&document, "twitter:title"))
        .or_else(|| title_tag(&document))
        .unwrap_or_else(|| extract_title_from_url(url));

    let site_name = meta_content(&document, "og:site_name")
        .or_else(|| meta_content(&document, "application-name"))
        .or_else(|| domain.clone());

    let image_url = meta_content(&document, "og:image")
        .or_else(|| meta_content(&document, "twitter:image"))
        .or_else(|| first_image_src(&document))
        .and_then(|candidate| resolve_url(&candidate, url));

    LinkMetadata {
        url: url.to_string(),
        title: Some(title),
        site_name,
        image_url,
        domain,
    }
}

/// Record produced when the fetch or parse fails entirely. Exactly one code
/// path fills a record — this one never mixes with parsed fields.
fn fallback_metadata(url: &str, domain: Option<String>) -> LinkMetadata {
    LinkMetadata {
        url: url.to_string(),
        title: Some(extract_title_from_url(url)),
        site_name: domain.clone(),
        image_url: None,
        domain,
    }
}

/// Content of the first `<meta>` tag whose `property` or `name` attribute
/// equals `key`, trimmed. Attribute order within the tag does not matter.
fn meta_content(doc: &Html, key: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"meta[property="{key}"], meta[name="{key}"]"#)).ok()?;
    doc.select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn title_tag(doc: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    doc.select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn first_image_src(doc: &Html) -> Option<String> {
    let selector = Selector::parse("img[src]").ok()?;
    doc.select(&selector)
        .next()
        .and_then(|el| el.value().attr("src"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Resolve an image candidate to an absolute URL.
///
/// Already-absolute candidates pass through unchanged; protocol-relative
/// ones take the base URL's scheme; everything else resolves as a relative
/// reference against `base_url`. Resolution failures return the candidate
/// unchanged rather than erroring.
pub fn resolve_url(candidate: &str, base_url: &str) -> Option<String> {
    if candidate.is_empty() {
        return None;
    }

    if candidate.starts_with("http://") || candidate.starts_with("https://") {
        return Some(candidate.to_string());
    }

    if candidate.starts_with("//") {
        return match Url::parse(base_url) {
            Ok(base) => Some(format!("{}:{}", base.scheme(), candidate)),
            Err(_) => Some(candidate.to_string()),
        };
    }

    match Url::parse(base_url).and_then(|base| base.join(candidate)) {
        Ok(resolved) => Some(resolved.to_string()),
        Err(_) => Some(candidate.to_string()),
    }
}

/// Derive a human-readable title from the URL itself, used when fetching or
/// parsing the page fails. The last meaningful path segment becomes the
/// title ("/blog/my-great-post.html" → "My Great Post"); a bare origin
/// falls back to the hostname without its `www.` prefix.
pub fn extract_title_from_url(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return "Link".to_string();
    };

    // The url crate percent-encodes non-ASCII path characters, so byte
    // slicing by ASCII suffix length is safe here.
    let mut path = parsed.path();
    path = path.strip_suffix('/').unwrap_or(path);
    let lower = path.to_lowercase();
    for ext in TITLE_EXTENSIONS {
        if lower.ends_with(ext) {
            path = &path[..path.len() - ext.len()];
            break;
        }
    }

    let segments: Vec<&str> = path
        .split('/')
        .filter(|s| !s.is_empty() && *s != "index")
        .collect();

    if let Some(last) = segments.last() {
        return capitalize_words(&last.replace(['-', '_'], " "));
    }

    match parsed.host_str() {
        Some(host) => host.strip_prefix("www.").unwrap_or(host).to_string(),
        None => "Link".to_string(),
    }
}

fn capitalize_words(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
