//! HTML parser for extracting links and metadata
//!
//! This module handles parsing HTML content to extract:
//! - Hyperlinks to follow (from `<a href>` tags)
//! - The page's meta description

use scraper::{Html, Selector};
use url::Url;

/// A hyperlink found on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    /// The href exactly as written when it is already absolute, otherwise
    /// the href resolved against the page URL
    pub target: String,
    /// Parsed form of the target, used for origin checks and fetching
    pub url: Url,
}

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// All followable hyperlinks on the page, in document order
    pub links: Vec<PageLink>,
}

/// Parses HTML content and extracts its links
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` tags anywhere in the document
///
/// **Exclude:**
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only links (`#section`)
/// - Anything that is not HTTP(S) after resolution
///
/// # Example
///
/// ```
/// use sitemap_auditor::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<body><a href="/page">Link</a><a href="https://Example.com">Home</a></body>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url);
/// assert_eq!(parsed.links[0].target, "https://example.com/page");
/// assert_eq!(parsed.links[1].target, "https://Example.com");
/// assert_eq!(parsed.links[1].url.as_str(), "https://example.com/");
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        links: extract_links(&document, base_url),
    }
}

/// True when the page carries a `<meta name="description">` with non-blank content
pub fn has_meta_description(html: &str) -> bool {
    let document = Html::parse_document(html);
    extract_meta_description(&document)
        .map(|content| !content.trim().is_empty())
        .unwrap_or(false)
}

fn extract_links(document: &Html, base_url: &Url) -> Vec<PageLink> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(link) = resolve_link(href, base_url) {
                    links.push(link);
                }
            }
        }
    }

    links
}

/// Finds the first `<meta name="description">`
///
/// The `name` attribute is compared case-insensitively. A tag without a
/// `content` attribute yields an empty string.
fn extract_meta_description(document: &Html) -> Option<String> {
    let selector = Selector::parse("meta[name]").ok()?;

    document
        .select(&selector)
        .find(|element| {
            element
                .value()
                .attr("name")
                .map(|name| name.trim().eq_ignore_ascii_case("description"))
                .unwrap_or(false)
        })
        .map(|element| element.value().attr("content").unwrap_or("").to_string())
}

/// Resolves a link href against the page URL and validates it
///
/// Returns None if the link should be excluded. An absolute href keeps its
/// original spelling as the target; only relative hrefs take the joined form.
fn resolve_link(href: &str, base_url: &Url) -> Option<PageLink> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    let (target, url) = match Url::parse(href) {
        Ok(url) => (href.to_string(), url),
        Err(_) => {
            let url = base_url.join(href).ok()?;
            (url.to_string(), url)
        }
    };

    matches!(url.scheme(), "http" | "https").then_some(PageLink { target, url })
}
