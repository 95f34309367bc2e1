use crate::url::OriginMatch;
use serde::Deserialize;

/// Main configuration structure
///
/// Every section is optional; missing sections and keys take their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the auditor
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the auditor
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the auditor
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,
}

impl UserAgentConfig {
    /// Formats the identity header sent with every request
    ///
    /// Format: `Name/Version` or `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "SitemapAuditor".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

/// HTTP fetching configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Timeout for robots.txt, sitemap, and sitemap probe requests (seconds)
    #[serde(rename = "sitemap-timeout-secs")]
    pub sitemap_timeout_secs: u64,

    /// Timeout for per-page checks and crawl requests (seconds)
    #[serde(rename = "page-timeout-secs")]
    pub page_timeout_secs: u64,

    /// Maximum redirect hops followed per request
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            sitemap_timeout_secs: 10,
            page_timeout_secs: 5,
            max_redirects: 10,
        }
    }
}

/// Analysis pipeline configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Width of the per-check worker pool
    pub workers: usize,

    /// Same-origin rule used by the crawler
    #[serde(rename = "origin-match")]
    pub origin_match: OriginMatch,

    /// Maximum number of pages fetched by one crawl (unlimited when absent)
    #[serde(rename = "max-pages")]
    pub max_pages: Option<usize>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            workers: 10,
            origin_match: OriginMatch::Structural,
            max_pages: None,
        }
    }
}
