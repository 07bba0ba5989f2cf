//! Public origin of the service, used to build absolute short URLs.

use axum::http::{HeaderMap, header};

/// Header set by reverse proxies carrying the client-facing scheme.
const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Returns `configured` if set, otherwise `scheme://host` from the request.
///
/// The scheme comes from `X-Forwarded-Proto` (first value) and defaults to
/// `http`. The host comes from the `Host` header and defaults to `localhost`.
/// Trailing slashes are trimmed so the result can be joined with `/{code}`.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "sho.rt:8080".parse().unwrap());
///
/// assert_eq!(resolve_base_url(None, &headers), "http://sho.rt:8080");
/// assert_eq!(resolve_base_url(Some("https://s.io/"), &headers), "https://s.io");
/// ```
pub fn resolve_base_url(configured: Option<&str>, headers: &HeaderMap) -> String {
    if let Some(base) = configured {
        return base.trim_end_matches('/').to_string();
    }

    let scheme = headers
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("http");

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or("localhost");

    format!("{}://{}", scheme, host.trim_end_matches('/'))
}

/// Joins a base origin and a short code.
pub fn short_url(base: &str, code: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), code)
}
