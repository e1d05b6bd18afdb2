//! Address helpers
//!
//! Addresses are compared byte-for-byte: nothing here normalizes scheme case,
//! trailing slashes or query strings. These helpers only decide whether a
//! link target is followable and, when relative resolution is enabled, turn a
//! relative target into an absolute one.

use url::Url;

/// Scheme prefixes accepted as absolute, fetchable addresses
const HTTP_PREFIXES: [&str; 2] = ["http://", "https://"];

/// Returns true if the address starts with an `http://` or `https://` prefix
///
/// The check is a case-sensitive byte prefix match.
///
/// # Examples
///
/// ```
/// use webc::url::is_http_address;
///
/// assert!(is_http_address("https://example.com/"));
/// assert!(!is_http_address("mailto:someone@example.com"));
/// assert!(!is_http_address("/relative/path"));
/// ```
pub fn is_http_address(address: &str) -> bool {
    HTTP_PREFIXES
        .iter()
        .any(|prefix| address.starts_with(prefix))
}

/// Resolves a link target against the address of the page it appeared on
///
/// Returns None for empty targets, fragment-only targets, targets that fail
/// to resolve, and anything whose resolved form is not HTTP(S).
pub fn resolve_href(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if is_http_address(href) {
        return Some(href.to_string());
    }

    let resolved = base.join(href).ok()?;
    match resolved.scheme() {
        "http" | "https" => Some(resolved.to_string()),
        _ => None,
    }
}
