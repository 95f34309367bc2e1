//! Content classification and candidate extraction
//!
//! A fetched source is either robots.txt text or sitemap XML. Robots text
//! yields directive paths plus the URLs of every sitemap it references.
//! XML yields the `<loc>` values of a leaf sitemap, or of every leaf reached
//! through a sitemap index.

use crate::crawler::{FetchKind, Fetcher};
use crate::robots::{fallback_urls, is_robots_url, RobotsDirectives};
use crate::sitemap::xml::{parse_sitemap_xml, SitemapDocument};
use crate::url::Origin;
use crate::AuditError;
use std::collections::{HashSet, VecDeque};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Robots,
    Xml,
}

/// Decides how a source should be parsed
///
/// Robots text when the source URL names robots.txt or the content type is
/// plain text; XML otherwise.
pub fn classify(source_url: &str, content_type: &str) -> ContentKind {
    if is_robots_url(source_url) || content_type.to_ascii_lowercase().contains("text/plain") {
        ContentKind::Robots
    } else {
        ContentKind::Xml
    }
}

/// Turns a fetched source into the list of declared URLs
///
/// Holds the set of sitemap URLs already read, so an index that lists
/// itself (directly or through another index) is only expanded once.
pub struct SourceParser<'a> {
    fetcher: &'a Fetcher,
    origin: &'a Origin,
    visited_sitemaps: HashSet<String>,
}

impl<'a> SourceParser<'a> {
    pub fn new(fetcher: &'a Fetcher, origin: &'a Origin) -> Self {
        Self {
            fetcher,
            origin,
            visited_sitemaps: HashSet::new(),
        }
    }

    /// Parses the top-level source
    ///
    /// Malformed top-level XML is an error. Everything reached from the
    /// source (index members, robots sitemap references) is best-effort:
    /// failures are logged and contribute no URLs.
    pub async fn parse(
        &mut self,
        content: &str,
        content_type: &str,
        source_url: &str,
    ) -> Result<Vec<String>, AuditError> {
        match classify(source_url, content_type) {
            ContentKind::Robots => {
                tracing::debug!("Parsing {} as robots.txt", source_url);
                Ok(self.parse_robots(content).await)
            }
            ContentKind::Xml => {
                tracing::debug!("Parsing {} as sitemap XML", source_url);
                let document =
                    parse_sitemap_xml(content).map_err(|e| AuditError::SitemapParse {
                        url: source_url.to_string(),
                        message: e.to_string(),
                    })?;
                self.visited_sitemaps.insert(source_url.to_string());
                Ok(self.expand(document).await)
            }
        }
    }

    async fn parse_robots(&mut self, content: &str) -> Vec<String> {
        let directives = RobotsDirectives::parse(content);

        let mut urls: Vec<String> = directives
            .candidate_urls(self.origin)
            .into_iter()
            .map(String::from)
            .collect();

        for sitemap_url in directives.sitemaps() {
            tracing::info!("Following sitemap reference {}", sitemap_url);
            if let Some(document) = self.fetch_sitemap(sitemap_url, true).await {
                urls.extend(self.expand(document).await);
            }
        }

        if urls.is_empty() {
            tracing::info!("robots.txt yielded no candidates, using fallback page list");
            urls = fallback_urls(self.origin)
                .into_iter()
                .map(String::from)
                .collect();
        }

        urls
    }

    /// Flattens a document into page URLs, fetching index members breadth-first
    async fn expand(&mut self, document: SitemapDocument) -> Vec<String> {
        if !document.is_index() {
            return document.locations;
        }

        let mut urls = Vec::new();
        let mut queue: VecDeque<String> = document.locations.into();

        while let Some(member) = queue.pop_front() {
            let Some(child) = self.fetch_sitemap(&member, false).await else {
                continue;
            };

            if child.is_index() {
                tracing::debug!("Nested sitemap index {}", member);
                queue.extend(child.locations);
            } else {
                tracing::debug!("Sitemap {} lists {} URLs", member, child.locations.len());
                urls.extend(child.locations);
            }
        }

        urls
    }

    /// Fetches and parses one referenced sitemap
    ///
    /// Returns None when the URL was already read, the fetch fails, the
    /// content type is required to be XML and isn't, or the XML is malformed.
    async fn fetch_sitemap(&mut self, url: &str, require_xml: bool) -> Option<SitemapDocument> {
        if !self.visited_sitemaps.insert(url.to_string()) {
            tracing::debug!("Sitemap {} already read, skipping", url);
            return None;
        }

        let document = match self.fetcher.get_ok(url, FetchKind::Sitemap).await {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!("Skipping sitemap {}: {}", url, e);
                return None;
            }
        };

        if require_xml && !document.is_xml() {
            tracing::warn!(
                "Skipping sitemap {}: content type '{}' is not XML",
                url,
                document.content_type
            );
            return None;
        }

        match parse_sitemap_xml(&document.body) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!("Skipping malformed sitemap {}: {}", url, e);
                None
            }
        }
    }
}
