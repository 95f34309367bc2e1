//! Robots.txt handling module
//!
//! robots.txt is read for two things: `Sitemap:` references and the paths
//! named by `Allow`/`Disallow` lines, which are used as page candidates when
//! a site has no usable sitemap. Crawl rules are not enforced.

mod parser;

pub use parser::{is_candidate_path, Directive, RobotsDirectives};

use crate::url::Origin;
use url::Url;

/// File name that marks a source as robots.txt
pub const ROBOTS_FILENAME: &str = "robots.txt";

/// Common site sections used when robots.txt yields no candidates at all
pub const FALLBACK_PATHS: [&str; 6] = ["/", "/about", "/contact", "/products", "/services", "/blog"];

/// The fallback page list, resolved against the origin
///
/// # Example
///
/// ```
/// use sitemap_auditor::robots::fallback_urls;
/// use sitemap_auditor::Origin;
///
/// let origin = Origin::parse("https://example.com").unwrap();
/// let urls = fallback_urls(&origin);
/// assert_eq!(urls[0].as_str(), "https://example.com/");
/// assert_eq!(urls[5].as_str(), "https://example.com/blog");
/// ```
pub fn fallback_urls(origin: &Origin) -> Vec<Url> {
    FALLBACK_PATHS
        .iter()
        .filter_map(|path| origin.join(path).ok())
        .collect()
}

/// True when a source URL names a robots.txt file
pub fn is_robots_url(url: &str) -> bool {
    url.contains(ROBOTS_FILENAME)
}
