//! Sitemap XML parsing
//!
//! Both document shapes of the sitemaps protocol are handled:
//!
//! ```xml
//! <urlset><url><loc>https://example.com/</loc></url></urlset>
//! <sitemapindex><sitemap><loc>https://example.com/a.xml</loc></sitemap></sitemapindex>
//! ```
//!
//! `<loc>` values are kept as written (trimmed, entities unescaped). They are
//! not parsed as URLs, so two spellings of one page stay distinct.

use quick_xml::events::Event;
use quick_xml::Reader;

/// Root element of a sitemap index
const INDEX_ROOT: &[u8] = b"sitemapindex";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitemapKind {
    /// `<urlset>`: `loc` values are pages
    UrlSet,
    /// `<sitemapindex>`: `loc` values are further sitemaps
    Index,
}

/// A parsed sitemap document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapDocument {
    pub kind: SitemapKind,
    /// Every non-empty `<loc>` value, in document order
    pub locations: Vec<String>,
}

impl SitemapDocument {
    pub fn is_index(&self) -> bool {
        self.kind == SitemapKind::Index
    }
}

/// Parses sitemap XML
///
/// The document is an index when its root element is `sitemapindex`
/// (namespace prefixes are ignored). Any other root is read as a leaf
/// sitemap, and every `<loc>` in it is collected.
///
/// # Example
///
/// ```
/// use sitemap_auditor::sitemap::parse_sitemap_xml;
///
/// let xml = r#"<?xml version="1.0"?>
/// <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
///   <url><loc>https://example.com/</loc></url>
///   <url><loc>https://example.com/about</loc></url>
/// </urlset>"#;
/// let document = parse_sitemap_xml(xml).unwrap();
/// assert!(!document.is_index());
/// assert_eq!(document.locations.len(), 2);
/// ```
pub fn parse_sitemap_xml(content: &str) -> Result<SitemapDocument, quick_xml::Error> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut kind: Option<SitemapKind> = None;
    let mut locations = Vec::new();
    let mut in_loc = false;
    let mut loc = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.local_name();
                if kind.is_none() {
                    kind = Some(if name.as_ref() == INDEX_ROOT {
                        SitemapKind::Index
                    } else {
                        SitemapKind::UrlSet
                    });
                }
                if name.as_ref() == b"loc" {
                    in_loc = true;
                    loc.clear();
                }
            }
            Event::Text(e) if in_loc => {
                loc.push_str(&e.unescape()?);
            }
            Event::CData(e) if in_loc => {
                loc.push_str(&String::from_utf8_lossy(&e));
            }
            Event::End(e) => {
                if e.local_name().as_ref() == b"loc" {
                    in_loc = false;
                    let value = loc.trim();
                    if !value.is_empty() {
                        locations.push(value.to_string());
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(SitemapDocument {
        kind: kind.unwrap_or(SitemapKind::UrlSet),
        locations,
    })
}
