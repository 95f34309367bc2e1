//! Sitemap location
//!
//! Turns a seed URL into the URL of the document to audit. Strategies run in
//! order, cheapest first, and the first that verifies wins:
//!
//! 1. The seed itself, when it ends in `sitemap.xml`
//! 2. `Sitemap:` lines of `{origin}/robots.txt`
//! 3. Conventional sitemap paths under the origin
//! 4. `{origin}/robots.txt` as the source of record
//!
//! A candidate verifies when it answers 2xx with an XML content type.
//! Resolution never fails; the last strategy always produces a source.

use crate::crawler::{FetchKind, Fetcher};
use crate::robots::RobotsDirectives;
use crate::url::Origin;
use serde::Serialize;
use std::fmt;
use url::Url;

/// Conventional sitemap file name
pub const SITEMAP_FILENAME: &str = "sitemap.xml";

/// Paths probed under the origin, in order
pub const COMMON_SITEMAP_PATHS: [&str; 4] = [
    "/sitemap.xml",
    "/sitemap_index.xml",
    "/sitemaps.xml",
    "/sitemap1.xml",
];

/// Which strategy produced the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolvedBy {
    Direct,
    RobotsDirective,
    CommonPath,
    RobotsFallback,
}

impl ResolvedBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::RobotsDirective => "robots-directive",
            Self::CommonPath => "common-path",
            Self::RobotsFallback => "robots-fallback",
        }
    }
}

impl fmt::Display for ResolvedBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The document chosen as the sitemap source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSource {
    pub url: String,
    pub resolved_by: ResolvedBy,
}

pub struct SitemapLocator<'a> {
    fetcher: &'a Fetcher,
}

impl<'a> SitemapLocator<'a> {
    pub fn new(fetcher: &'a Fetcher) -> Self {
        Self { fetcher }
    }

    /// Resolves the sitemap source for a seed URL
    pub async fn resolve(&self, seed: &Url, origin: &Origin) -> ResolvedSource {
        if seed.as_str().ends_with(SITEMAP_FILENAME) && self.fetcher.probe_xml(seed.as_str()).await {
            tracing::info!("Using seed {} as sitemap", seed);
            return ResolvedSource {
                url: seed.to_string(),
                resolved_by: ResolvedBy::Direct,
            };
        }

        let robots_url = origin.robots_url();

        if let Some(url) = self.from_robots(&robots_url).await {
            tracing::info!("Using sitemap {} from robots.txt", url);
            return ResolvedSource {
                url,
                resolved_by: ResolvedBy::RobotsDirective,
            };
        }

        for path in COMMON_SITEMAP_PATHS {
            let candidate = match origin.join(path) {
                Ok(url) => url,
                Err(e) => {
                    tracing::debug!("Skipping sitemap path {}: {}", path, e);
                    continue;
                }
            };
            if self.fetcher.probe_xml(candidate.as_str()).await {
                tracing::info!("Using sitemap at conventional path {}", candidate);
                return ResolvedSource {
                    url: candidate.to_string(),
                    resolved_by: ResolvedBy::CommonPath,
                };
            }
        }

        tracing::info!("No sitemap found, falling back to {}", robots_url);
        ResolvedSource {
            url: robots_url.to_string(),
            resolved_by: ResolvedBy::RobotsFallback,
        }
    }

    /// First `Sitemap:` reference in robots.txt that verifies
    async fn from_robots(&self, robots_url: &Url) -> Option<String> {
        let document = match self.fetcher.get_ok(robots_url.as_str(), FetchKind::Sitemap).await {
            Ok(document) => document,
            Err(e) => {
                tracing::debug!("robots.txt unavailable: {}", e);
                return None;
            }
        };

        let directives = RobotsDirectives::parse(&document.body);
        for sitemap_url in directives.sitemaps() {
            if self.fetcher.probe_xml(sitemap_url).await {
                return Some(sitemap_url.to_string());
            }
        }

        None
    }
}
