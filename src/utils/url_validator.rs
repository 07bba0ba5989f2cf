//! Destination URL validation.

use url::Url;

/// Returns true if `input` parses as an absolute URL with scheme `http` or `https`.
///
/// Parse failures are reported as `false`, never as an error.
pub fn is_valid_url(input: &str) -> bool {
    match Url::parse(input) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}
