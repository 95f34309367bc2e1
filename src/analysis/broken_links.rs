//! Broken-link detection
//!
//! Every declared URL is requested with the page timeout. Only failures are
//! reported: an error status, or no response at all.

use crate::crawler::{is_error_status, FetchKind, Fetcher};
use futures::stream::{self, StreamExt};
use serde::{Serialize, Serializer};

/// Why a link counts as broken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    /// Response status >= 400
    Http(u16),
    /// Timeout, DNS, connection refused, TLS, or an unusable URL
    ConnectionError,
}

impl LinkStatus {
    pub fn label(&self) -> String {
        match self {
            Self::Http(code) => code.to_string(),
            Self::ConnectionError => "connection-error".to_string(),
        }
    }
}

impl Serialize for LinkStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Http(code) => serializer.serialize_u16(*code),
            Self::ConnectionError => serializer.serialize_str("connection-error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokenLink {
    pub url: String,
    pub status: LinkStatus,
}

/// Checks one URL, returning an entry only if it is broken
pub async fn check_link(fetcher: &Fetcher, url: String) -> Option<BrokenLink> {
    match fetcher.status(&url, FetchKind::Page).await {
        Ok(code) if is_error_status(code) => {
            tracing::warn!("Broken link {} ({})", url, code);
            Some(BrokenLink {
                url,
                status: LinkStatus::Http(code),
            })
        }
        Ok(_) => None,
        Err(e) => {
            tracing::warn!("Broken link {}: {}", url, e);
            Some(BrokenLink {
                url,
                status: LinkStatus::ConnectionError,
            })
        }
    }
}

/// Checks all URLs with at most `workers` requests in flight
///
/// Entries come back in completion order.
pub async fn find_broken_links(fetcher: &Fetcher, urls: &[String], workers: usize) -> Vec<BrokenLink> {
    let checks = urls.iter().cloned().map(move |url| check_link(fetcher, url));

    stream::iter(checks)
        .buffer_unordered(workers.max(1))
        .filter_map(|result| async move { result })
        .collect()
        .await
}
