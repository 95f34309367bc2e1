//! Sitemap location tests

use crate::{mount_html, mount_text, mount_xml, test_fetcher, urlset};
use sitemap_auditor::sitemap::{ResolvedBy, SitemapLocator};
use sitemap_auditor::{parse_seed, Origin};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn resolve(seed: &str) -> (String, ResolvedBy) {
    let fetcher = test_fetcher();
    let seed = parse_seed(seed).unwrap();
    let origin = Origin::from_url(&seed).unwrap();
    let source = SitemapLocator::new(&fetcher).resolve(&seed, &origin).await;
    (source.url, source.resolved_by)
}

#[tokio::test]
async fn test_direct_sitemap_skips_other_probes() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_xml(&server, "/sitemap.xml", &urlset(&[format!("{}/", base)])).await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let seed = format!("{}/sitemap.xml", base);
    let (url, resolved_by) = resolve(&seed).await;

    assert_eq!(resolved_by, ResolvedBy::Direct);
    assert_eq!(url, seed);
}

#[tokio::test]
async fn test_robots_sitemap_first_valid_wins() {
    let server = MockServer::start().await;
    let base = server.uri();

    let robots = format!(
        "User-agent: *\nDisallow: /admin\nSitemap: {base}/missing.xml\nSitemap: {base}/html-map\nSitemap: {base}/maps/main.xml\nSitemap: {base}/maps/second.xml\n"
    );
    mount_text(&server, "/robots.txt", &robots).await;
    mount_html(&server, "/html-map", "<html></html>").await;
    mount_xml(&server, "/maps/main.xml", &urlset(&[])).await;
    mount_xml(&server, "/maps/second.xml", &urlset(&[])).await;

    let (url, resolved_by) = resolve(&base).await;

    assert_eq!(resolved_by, ResolvedBy::RobotsDirective);
    assert_eq!(url, format!("{}/maps/main.xml", base));
}

#[tokio::test]
async fn test_common_paths_probed_in_order() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_xml(&server, "/sitemap_index.xml", &urlset(&[])).await;
    mount_xml(&server, "/sitemap1.xml", &urlset(&[])).await;

    let (url, resolved_by) = resolve(&base).await;

    assert_eq!(resolved_by, ResolvedBy::CommonPath);
    assert_eq!(url, format!("{}/sitemap_index.xml", base));
}

#[tokio::test]
async fn test_robots_without_sitemap_lines_falls_through_to_common_paths() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_text(&server, "/robots.txt", "User-agent: *\nDisallow: /private\n").await;
    mount_xml(&server, "/sitemaps.xml", &urlset(&[])).await;

    let (url, resolved_by) = resolve(&format!("{}/blog/post", base)).await;

    assert_eq!(resolved_by, ResolvedBy::CommonPath);
    assert_eq!(url, format!("{}/sitemaps.xml", base));
}

#[tokio::test]
async fn test_falls_back_to_robots_when_nothing_verifies() {
    let server = MockServer::start().await;
    let base = server.uri();

    // Served, but not as XML
    mount_html(&server, "/sitemap.xml", "<html>Not found</html>").await;

    let (url, resolved_by) = resolve(&format!("{}/sitemap.xml", base)).await;

    assert_eq!(resolved_by, ResolvedBy::RobotsFallback);
    assert_eq!(url, format!("{}/robots.txt", base));
}

#[tokio::test]
async fn test_non_2xx_xml_is_rejected() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(500).set_body_raw(urlset(&[]).into_bytes(), "application/xml"))
        .mount(&server)
        .await;

    let (_, resolved_by) = resolve(&base).await;

    assert_eq!(resolved_by, ResolvedBy::RobotsFallback);
}
