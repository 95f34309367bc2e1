//! SEO checks
//!
//! The only signal checked is the meta description.

use crate::crawler::{has_meta_description, FetchKind, Fetcher};
use futures::stream::{self, StreamExt};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeoIssueKind {
    /// No `<meta name="description">`, or its content is blank
    MissingMetaDescription,
    /// The page could not be fetched
    FetchError,
}

impl SeoIssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingMetaDescription => "missing-meta-description",
            Self::FetchError => "fetch-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeoIssue {
    pub url: String,
    pub issue: SeoIssueKind,
}

/// Checks a single page's HTML for a non-blank meta description
pub fn check_html(html: &str) -> Option<SeoIssueKind> {
    if has_meta_description(html) {
        None
    } else {
        Some(SeoIssueKind::MissingMetaDescription)
    }
}

async fn check_page(fetcher: &Fetcher, url: String) -> Option<SeoIssue> {
    let issue = match fetcher.get_ok(&url, FetchKind::Page).await {
        Ok(document) => check_html(&document.body),
        Err(e) => {
            tracing::debug!("SEO fetch failed for {}: {}", url, e);
            Some(SeoIssueKind::FetchError)
        }
    }?;

    tracing::warn!("SEO issue on {}: {}", url, issue.as_str());
    Some(SeoIssue { url, issue })
}

/// Checks all URLs with at most `workers` requests in flight
///
/// Issues come back in completion order.
pub async fn find_seo_issues(fetcher: &Fetcher, urls: &[String], workers: usize) -> Vec<SeoIssue> {
    let checks = urls.iter().cloned().map(move |url| check_page(fetcher, url));

    stream::iter(checks)
        .buffer_unordered(workers.max(1))
        .filter_map(|result| async move { result })
        .collect()
        .await
}
