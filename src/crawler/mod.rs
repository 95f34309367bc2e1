//! Crawler module for web page fetching and processing
//!
//! This module contains the HTTP side of the auditor:
//! - One shared HTTP session with per-request timeouts
//! - HTML parsing for links and the meta description
//! - Same-origin traversal from the site root

mod fetcher;
mod parser;
mod traversal;

pub use fetcher::{
    build_http_client, is_error_status, is_xml_content_type, FetchError, FetchKind,
    FetchedDocument, Fetcher,
};
pub use parser::{has_meta_description, parse_html, PageLink, ParsedPage};
pub use traversal::{crawl_site, CrawlFailure, CrawlOptions, CrawlOutcome};
