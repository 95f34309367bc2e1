//! Analysis pipeline
//!
//! An audit runs in two phases:
//!
//! 1. Discovery: locate the sitemap source for the seed, fetch it, and
//!    extract the declared URLs. Failure here is the only fatal path.
//! 2. Checks: broken links, the orphan crawl, and SEO checks run
//!    concurrently. Per-URL failures become report entries.

mod broken_links;
mod orphans;
mod report;
mod seo;

pub use broken_links::{check_link, find_broken_links, BrokenLink, LinkStatus};
pub use orphans::find_orphans;
pub use report::{AnalysisOutcome, AnalysisReport};
pub use seo::{check_html, find_seo_issues, SeoIssue, SeoIssueKind};

use crate::config::{AnalysisConfig, Config};
use crate::crawler::{crawl_site, CrawlOptions, FetchKind, Fetcher};
use crate::sitemap::{ResolvedSource, SitemapLocator, SourceParser};
use crate::url::{parse_seed, Origin};
use crate::{AuditError, Result};
use chrono::Utc;
use url::Url;

/// Output of the discovery phase
#[derive(Debug, Clone)]
pub struct Discovery {
    pub seed: Url,
    pub origin: Origin,
    pub source: ResolvedSource,
    /// Declared URLs in source order, duplicates kept
    pub declared_urls: Vec<String>,
}

/// Runs audits against sites
///
/// The analyzer holds only the shared HTTP session and settings, so one
/// instance can run any number of audits, including concurrently.
#[derive(Debug, Clone)]
pub struct Analyzer {
    fetcher: Fetcher,
    workers: usize,
    crawl_options: CrawlOptions,
}

impl Analyzer {
    /// Creates an analyzer from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let fetcher = Fetcher::new(&config.user_agent, &config.fetcher)?;
        Ok(Self::with_fetcher(fetcher, &config.analysis))
    }

    /// Creates an analyzer around an existing fetcher
    pub fn with_fetcher(fetcher: Fetcher, config: &AnalysisConfig) -> Self {
        Self {
            fetcher,
            workers: config.workers,
            crawl_options: CrawlOptions {
                origin_match: config.origin_match,
                max_pages: config.max_pages,
            },
        }
    }

    /// Locates the sitemap source for a seed without fetching it
    pub async fn resolve(&self, seed: &str) -> Result<(Url, Origin, ResolvedSource)> {
        let seed = parse_seed(seed)?;
        let origin = Origin::from_url(&seed)?;
        let source = SitemapLocator::new(&self.fetcher).resolve(&seed, &origin).await;
        Ok((seed, origin, source))
    }

    /// Locates, fetches, and parses the sitemap source
    ///
    /// # Errors
    ///
    /// Fails if the seed is not a usable URL, the source cannot be fetched,
    /// or the source is malformed XML. An empty result is not an error here.
    pub async fn discover(&self, seed: &str) -> Result<Discovery> {
        let (seed, origin, source) = self.resolve(seed).await?;

        tracing::info!("Fetching sitemap source {} ({})", source.url, source.resolved_by);
        let document = self
            .fetcher
            .get_ok(&source.url, FetchKind::Sitemap)
            .await
            .map_err(AuditError::SourceFetch)?;

        let declared_urls = SourceParser::new(&self.fetcher, &origin)
            .parse(&document.body, &document.content_type, &source.url)
            .await?;

        tracing::info!("Sitemap source declares {} URLs", declared_urls.len());

        Ok(Discovery {
            seed,
            origin,
            source,
            declared_urls,
        })
    }

    /// Runs a full audit
    ///
    /// # Errors
    ///
    /// Any discovery failure, or [`AuditError::NoUrls`] when the source
    /// declares nothing.
    pub async fn analyze(&self, seed: &str) -> Result<AnalysisReport> {
        let started_at = Utc::now();
        let discovery = self.discover(seed).await?;

        if discovery.declared_urls.is_empty() {
            return Err(AuditError::NoUrls);
        }

        let declared = &discovery.declared_urls;
        tracing::info!(
            "Checking {} URLs with {} workers",
            declared.len(),
            self.workers
        );

        let (broken_links, crawl, seo_issues) = tokio::join!(
            find_broken_links(&self.fetcher, declared, self.workers),
            crawl_site(&self.fetcher, &discovery.origin, self.crawl_options),
            find_seo_issues(&self.fetcher, declared, self.workers),
        );

        let orphan_pages = find_orphans(declared, &crawl.reachable);

        let report = AnalysisReport {
            seed_url: discovery.seed.to_string(),
            sitemap_url: discovery.source.url,
            resolved_by: discovery.source.resolved_by,
            declared_urls: declared.len(),
            reachable_pages: crawl.reachable.len(),
            broken_links,
            orphan_pages,
            seo_issues,
            crawl_failures: crawl.failures,
            crawl_truncated: crawl.truncated,
            started_at,
            finished_at: Utc::now(),
        };

        tracing::info!(
            "Audit complete: {} broken, {} orphaned, {} SEO issues, {} crawl failures",
            report.broken_links.len(),
            report.orphan_pages.len(),
            report.seo_issues.len(),
            report.crawl_failures.len()
        );

        Ok(report)
    }

    /// Runs a full audit, folding any fatal error into the outcome
    pub async fn analyze_outcome(&self, seed: &str) -> AnalysisOutcome {
        let result = self.analyze(seed).await;
        if let Err(e) = &result {
            tracing::error!("Audit of {} failed: {}", seed, e);
        }
        result.into()
    }
}
