use std::net::IpAddr;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use url::Url;

use crate::error::{AppError, AppResult};
use crate::linkmeta::is_metadata_supported;
use crate::models::LinkMetadata;
use crate::state::AppState;

/// Returns `true` if `ip` is a private, loopback, or link-local address.
pub fn is_private_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            v4.is_private()
                || v4.is_loopback()
                || v4.is_link_local()
                || v4.is_broadcast()
                || v4.octets()[0] == 0
        }
        IpAddr::V6(v6) => {
            v6.is_loopback()
                || (v6.segments()[0] & 0xfe00 == 0xfc00)
                || (v6.segments()[0] & 0xffc0 == 0xfe80)
        }
    }
}

#[derive(Deserialize)]
pub struct LinkPreviewQuery {
    pub url: String,
}

/// GET /link-preview?url=<encoded-url>
///
/// Fetches Open Graph metadata for the given URL. Results are never cached;
/// each call constructs a fresh record. Rejects private/loopback IPs
/// (SSRF protection) and URLs the metadata-support filter excludes.
pub async fn get_link_preview(
    State(state): State<AppState>,
    Query(params): Query<LinkPreviewQuery>,
) -> AppResult<Json<LinkMetadata>> {
    let url_str = params.url;

    // ── Validate URL ──────────────────────────────────────────────────────
    let parsed = Url::parse(&url_str).map_err(|_| AppError::Validation("Invalid URL".into()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        _ => {
            return Err(AppError::Validation(
                "Only http/https URLs are supported".into(),
            ))
        }
    }

    if !is_metadata_supported(&url_str) {
        return Err(AppError::Validation(
            "URL does not support link metadata".into(),
        ));
    }

    let host = parsed
        .host_str()
        .ok_or_else(|| AppError::Validation("URL has no host".into()))?
        .to_string();

    // ── SSRF: resolve hostname and check all IPs ──────────────────────────
    let lookup_target = format!("{}:80", host);
    let addrs = tokio::net::lookup_host(&lookup_target)
        .await
        .map_err(|_| AppError::Validation("Could not resolve URL host".into()))?;

    for addr in addrs {
        if is_private_ip(addr.ip()) {
            return Err(AppError::Validation(
                "URL resolves to a private or reserved address".into(),
            ));
        }
    }

    // ── Fetch ─────────────────────────────────────────────────────────────
    // The fetcher itself never fails; unreachable pages come back as
    // URL-derived fallback records.
    Ok(Json(state.fetcher.fetch(&url_str).await))
}
