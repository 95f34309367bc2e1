//! Same-origin site traversal
//!
//! Starting from the site root, pages are fetched one at a time and every
//! same-origin link found on them is followed. Each URL is fetched at most
//! once. Every same-origin link found on a fetched page belongs to the
//! site's reachable set; pages that fail to load are reported separately.

use crate::crawler::fetcher::{FetchKind, Fetcher};
use crate::crawler::parser::{parse_html, PageLink};
use crate::url::{Origin, OriginMatch};
use serde::Serialize;
use std::collections::HashSet;
use std::time::Instant;

/// Knobs for one traversal
#[derive(Debug, Clone, Copy, Default)]
pub struct CrawlOptions {
    /// How discovered links are tested against the origin
    pub origin_match: OriginMatch,
    /// Stop after this many fetch attempts
    pub max_pages: Option<usize>,
}

/// A page the crawl tried and failed to fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlFailure {
    pub url: String,
    pub reason: String,
}

/// Result of a traversal
#[derive(Debug, Clone, Default)]
pub struct CrawlOutcome {
    /// Same-origin link targets found on fetched pages, spelled as the page
    /// wrote them, plus the root once it loads. A declared root URL is thus
    /// never an orphan as long as the root page answers.
    pub reachable: HashSet<String>,
    /// Fetch failures, in the order they happened
    pub failures: Vec<CrawlFailure>,
    /// Number of fetch attempts made
    pub pages_fetched: usize,
    /// True if `max_pages` stopped the crawl with links still pending
    pub truncated: bool,
}

/// Crawls every page reachable from the origin root through same-origin links
///
/// Traversal is depth-first over an explicit stack: links of a page are
/// pushed in reverse so the first link on the page is visited next. A URL
/// enters the visited set when it is popped, before its fetch, so it is
/// never fetched twice no matter how many pages link to it. Both sets are
/// keyed on the link target as written, so they compare exactly against
/// sitemap entries. Failed fetches are recorded and the traversal continues
/// with the remaining stack.
pub async fn crawl_site(fetcher: &Fetcher, origin: &Origin, options: CrawlOptions) -> CrawlOutcome {
    let mut outcome = CrawlOutcome::default();
    let mut visited: HashSet<String> = HashSet::new();
    let root = origin.root_url();
    let mut stack = vec![PageLink {
        target: root.to_string(),
        url: root.clone(),
    }];
    let start_time = Instant::now();

    tracing::info!("Crawling {} ({:?} origin match)", origin, options.origin_match);

    while let Some(PageLink { target, url }) = stack.pop() {
        if !visited.insert(target.clone()) {
            continue;
        }

        if let Some(max_pages) = options.max_pages {
            if outcome.pages_fetched >= max_pages {
                tracing::warn!("Page limit of {} reached, stopping crawl", max_pages);
                outcome.truncated = true;
                break;
            }
        }

        outcome.pages_fetched += 1;
        tracing::debug!("Crawling {}", target);

        let document = match fetcher.get_ok(url.as_str(), FetchKind::Page).await {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!("Crawl fetch failed for {}: {}", target, e);
                outcome.failures.push(CrawlFailure {
                    url: target,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        if url == *root {
            outcome.reachable.insert(target);
        }

        let parsed = parse_html(&document.body, &url);
        for link in parsed.links.into_iter().rev() {
            if !origin.matches(&link.url, options.origin_match) {
                continue;
            }
            outcome.reachable.insert(link.target.clone());
            if !visited.contains(&link.target) {
                stack.push(link);
            }
        }

        if outcome.pages_fetched % 25 == 0 {
            let elapsed = start_time.elapsed();
            tracing::info!(
                "Progress: {} pages crawled, {} pending, {:.2} pages/sec",
                outcome.pages_fetched,
                stack.len(),
                outcome.pages_fetched as f64 / elapsed.as_secs_f64()
            );
        }
    }

    tracing::info!(
        "Crawl finished: {} reachable, {} failed, {} fetched",
        outcome.reachable.len(),
        outcome.failures.len(),
        outcome.pages_fetched
    );

    outcome
}
