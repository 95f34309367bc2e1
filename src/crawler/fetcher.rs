//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests made by the auditor, including:
//! - Building one shared HTTP client carrying the identity header
//! - Per-request timeouts (long for sitemap-level fetches, short for pages)
//! - Error classification (timeout, connection, bad status)
//!
//! There are no retries: a transient failure is recorded as-is for the run.

use crate::config::{FetcherConfig, UserAgentConfig};
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Which timeout a request runs under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// robots.txt, sitemaps, sitemap probes
    Sitemap,
    /// Broken-link checks, SEO checks, crawl pages
    Page,
}

/// Errors produced by a single fetch
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {source}")]
    Connect { url: String, source: reqwest::Error },

    #[error("HTTP error for {url}: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
}

impl FetchError {
    fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else if error.is_connect() {
            Self::Connect {
                url: url.to_string(),
                source: error,
            }
        } else {
            Self::Request {
                url: url.to_string(),
                source: error,
            }
        }
    }
}

/// A fetched document
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    /// HTTP status code
    pub status_code: u16,
    /// Content-Type header value (empty when absent)
    pub content_type: String,
    /// Response body
    pub body: String,
}

impl FetchedDocument {
    /// True for 2xx responses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// True when the declared content type mentions XML
    pub fn is_xml(&self) -> bool {
        is_xml_content_type(&self.content_type)
    }
}

/// Checks whether a Content-Type header value indicates XML
pub fn is_xml_content_type(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("xml")
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use sitemap_auditor::config::{FetcherConfig, UserAgentConfig};
/// use sitemap_auditor::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    config: &FetcherConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(config.sitemap_timeout_secs))
        .connect_timeout(Duration::from_secs(config.sitemap_timeout_secs))
        .redirect(Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Shared HTTP session
///
/// Cloning is cheap: clones share the underlying connection pool. The session
/// holds no mutable state, so it is safe to use from any number of workers.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    sitemap_timeout: Duration,
    page_timeout: Duration,
}

impl Fetcher {
    /// Creates a fetcher from configuration
    pub fn new(user_agent: &UserAgentConfig, config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        let client = build_http_client(user_agent, config)?;
        Ok(Self::with_client(
            client,
            Duration::from_secs(config.sitemap_timeout_secs),
            Duration::from_secs(config.page_timeout_secs),
        ))
    }

    /// Wraps an existing client
    pub fn with_client(client: Client, sitemap_timeout: Duration, page_timeout: Duration) -> Self {
        Self {
            client,
            sitemap_timeout,
            page_timeout,
        }
    }

    fn timeout_for(&self, kind: FetchKind) -> Duration {
        match kind {
            FetchKind::Sitemap => self.sitemap_timeout,
            FetchKind::Page => self.page_timeout,
        }
    }

    async fn send(&self, url: &str, kind: FetchKind) -> Result<reqwest::Response, FetchError> {
        self.client
            .get(url)
            .timeout(self.timeout_for(kind))
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))
    }

    /// Fetches a URL and returns the document whatever its status
    pub async fn get(&self, url: &str, kind: FetchKind) -> Result<FetchedDocument, FetchError> {
        let response = self.send(url, kind).await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        Ok(FetchedDocument {
            status_code: status.as_u16(),
            content_type,
            body,
        })
    }

    /// Fetches a URL, treating any status >= 400 as an error
    pub async fn get_ok(&self, url: &str, kind: FetchKind) -> Result<FetchedDocument, FetchError> {
        let document = self.get(url, kind).await?;
        if is_error_status(document.status_code) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: document.status_code,
            });
        }
        Ok(document)
    }

    /// Returns only the status code of a URL, without reading the body
    pub async fn status(&self, url: &str, kind: FetchKind) -> Result<u16, FetchError> {
        let response = self.send(url, kind).await?;
        Ok(response.status().as_u16())
    }

    /// Checks that a URL answers 2xx with an XML content type
    ///
    /// Any failure counts as "not a sitemap"; nothing is propagated.
    pub async fn probe_xml(&self, url: &str) -> bool {
        match self.get(url, FetchKind::Sitemap).await {
            Ok(document) => {
                let ok = document.is_success() && document.is_xml();
                tracing::debug!(
                    "Probe {} -> {} ({}): {}",
                    url,
                    document.status_code,
                    document.content_type,
                    if ok { "sitemap" } else { "rejected" }
                );
                ok
            }
            Err(e) => {
                tracing::debug!("Probe {} failed: {}", url, e);
                false
            }
        }
    }
}

/// Client or server error status
pub fn is_error_status(status_code: u16) -> bool {
    StatusCode::from_u16(status_code)
        .map(|s| s.is_client_error() || s.is_server_error())
        .unwrap_or(status_code >= 400)
}
