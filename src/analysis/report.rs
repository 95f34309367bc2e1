//! Analysis report types

use crate::analysis::broken_links::BrokenLink;
use crate::analysis::seo::SeoIssue;
use crate::crawler::CrawlFailure;
use crate::sitemap::ResolvedBy;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything one audit found
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub seed_url: String,
    pub sitemap_url: String,
    pub resolved_by: ResolvedBy,
    /// Number of URLs the sitemap source declared
    pub declared_urls: usize,
    /// Size of the crawl's reachable set
    pub reachable_pages: usize,
    pub broken_links: Vec<BrokenLink>,
    pub orphan_pages: Vec<String>,
    pub seo_issues: Vec<SeoIssue>,
    pub crawl_failures: Vec<CrawlFailure>,
    pub crawl_truncated: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl AnalysisReport {
    /// Total number of flagged entries across all categories
    pub fn issue_count(&self) -> usize {
        self.broken_links.len()
            + self.orphan_pages.len()
            + self.seo_issues.len()
            + self.crawl_failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.issue_count() == 0
    }

    pub fn duration_secs(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}

/// A complete report, or the single error that stopped the audit
///
/// Serializes as the bare report object or as `{"error": "..."}`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Report(Box<AnalysisReport>),
    Error { error: String },
}

impl AnalysisOutcome {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        match self {
            Self::Report(report) => Some(report.as_ref()),
            Self::Error { .. } => None,
        }
    }
}

impl From<crate::Result<AnalysisReport>> for AnalysisOutcome {
    fn from(result: crate::Result<AnalysisReport>) -> Self {
        match result {
            Ok(report) => Self::Report(Box::new(report)),
            Err(e) => Self::error(e.to_string()),
        }
    }
}
