//! HTML parser for extracting links and the page title
//!
//! Link extraction is pure and never fails: markup the parser cannot make
//! sense of simply yields fewer (or no) links.

use crate::url::{is_http_address, resolve_href};
use scraper::{Html, Selector};
use url::Url;

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// Followable link targets, in document order, duplicates included
    pub links: Vec<String>,
}

/// Parses page content, keeping only absolute HTTP(S) link targets
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `href` values of `<a>` elements that start with `http://` or `https://`
///
/// **Exclude:**
/// - Relative targets (`/about`, `page.html`, `../up`)
/// - `javascript:`, `mailto:`, `tel:`, `data:` and fragment-only targets
///
/// Surrounding whitespace in the attribute value is trimmed; nothing else
/// about the address is changed.
///
/// # Example
///
/// ```
/// use webc::crawler::parse_page;
///
/// let html = r#"<html><head><title>Test</title></head>
///     <body><a href="https://example.com/a">A</a><a href="/b">B</a></body></html>"#;
/// let parsed = parse_page(html);
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert_eq!(parsed.links, vec!["https://example.com/a".to_string()]);
/// ```
pub fn parse_page(content: &str) -> ParsedPage {
    let document = Html::parse_document(content);

    let links = anchor_targets(&document)
        .into_iter()
        .filter(|href| is_http_address(href))
        .map(str::to_string)
        .collect();

    ParsedPage {
        title: extract_title(&document),
        links,
    }
}

/// Parses page content, resolving relative link targets against `base`
///
/// Absolute HTTP(S) targets are kept verbatim; relative ones are joined onto
/// the page address. Targets that do not end up as HTTP(S) are dropped.
pub fn parse_page_resolved(content: &str, base: &Url) -> ParsedPage {
    let document = Html::parse_document(content);

    let links = anchor_targets(&document)
        .into_iter()
        .filter_map(|href| resolve_href(base, href))
        .collect();

    ParsedPage {
        title: extract_title(&document),
        links,
    }
}

/// Returns the absolute HTTP(S) link targets found in `content`
pub fn extract_links(content: &str) -> Vec<String> {
    parse_page(content).links
}

/// Returns link targets with relative ones resolved against `base`
pub fn extract_links_resolved(content: &str, base: &Url) -> Vec<String> {
    parse_page_resolved(content, base).links
}

/// Collects the trimmed `href` values of every anchor in document order
fn anchor_targets(document: &Html) -> Vec<&str> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::trim)
        .collect()
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}
