//! URL Utility Functions
//!
//! Resolution of the relative references a page carries (`<link href>`,
//! `<video src>`, `<iframe src>`) into the absolute form a browser would
//! report through `element.href` / `element.src`.

use url::Url;

/// Parse a page address, accepting only absolute URLs.
#[must_use]
pub fn parse_url(url_str: &str) -> Option<Url> {
    let url_str = url_str.trim();
    if url_str.is_empty() {
        return None;
    }
    Url::parse(url_str).ok()
}

/// Convert a relative or absolute reference to absolute form.
///
/// # Arguments
/// * `url_str` - The reference to resolve (can be relative or absolute)
/// * `base` - The base URL for resolution, usually the page address
///
/// # Returns
/// * The absolute URL string. Blank input yields an empty string; a
///   reference that cannot be resolved (no base, malformed) is returned
///   trimmed but otherwise as written.
#[must_use]
pub fn resolve(url_str: &str, base: Option<&Url>) -> String {
    let url_str = url_str.trim();

    if url_str.is_empty() {
        return String::new();
    }

    // Already absolute, including data: and blob: references
    if let Ok(url) = Url::parse(url_str) {
        return url.to_string();
    }

    match base.map(|b| b.join(url_str)) {
        Some(Ok(resolved)) => resolved.to_string(),
        _ => url_str.to_string(),
    }
}
