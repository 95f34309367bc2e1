//! Integration tests for the auditor
//!
//! These tests use wiremock to stand up mock sites and exercise sitemap
//! location, crawling, and full audits end-to-end.

mod analysis_tests;
mod locator_tests;

use sitemap_auditor::config::{FetcherConfig, UserAgentConfig};
use sitemap_auditor::crawler::Fetcher;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A fetcher with short timeouts
pub fn test_fetcher() -> Fetcher {
    let config = FetcherConfig {
        sitemap_timeout_secs: 3,
        page_timeout_secs: 3,
        max_redirects: 5,
    };
    let user_agent = UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: None,
    };
    Fetcher::new(&user_agent, &config).expect("Failed to build fetcher")
}

pub fn urlset(urls: &[String]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
"#,
    );
    for url in urls {
        xml.push_str(&format!("  <url><loc>{}</loc></url>\n", url));
    }
    xml.push_str("</urlset>\n");
    xml
}

pub fn sitemap_index(sitemaps: &[String]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
"#,
    );
    for sitemap in sitemaps {
        xml.push_str(&format!("  <sitemap><loc>{}</loc></sitemap>\n", sitemap));
    }
    xml.push_str("</sitemapindex>\n");
    xml
}

/// Mounts a GET route answering 200 with the given body and content type
pub async fn mount(server: &MockServer, route: &str, content_type: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), content_type))
        .mount(server)
        .await;
}

pub async fn mount_xml(server: &MockServer, route: &str, body: &str) {
    mount(server, route, "application/xml", body).await;
}

pub async fn mount_html(server: &MockServer, route: &str, body: &str) {
    mount(server, route, "text/html", body).await;
}

pub async fn mount_text(server: &MockServer, route: &str, body: &str) {
    mount(server, route, "text/plain", body).await;
}

/// A minimal HTML page with an optional meta description and some links
pub fn page(description: Option<&str>, links: &[&str]) -> String {
    let meta = description
        .map(|d| format!(r#"<meta name="description" content="{}">"#, d))
        .unwrap_or_default();
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">{}</a>"#, href, href))
        .collect();
    format!(
        "<html><head><title>Test</title>{}</head><body>{}</body></html>",
        meta, anchors
    )
}
