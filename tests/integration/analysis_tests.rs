//! End-to-end audit tests

use crate::{mount_html, mount_text, mount_xml, page, sitemap_index, test_fetcher, urlset};
use sitemap_auditor::analysis::{Analyzer, LinkStatus, SeoIssueKind};
use sitemap_auditor::config::AnalysisConfig;
use sitemap_auditor::robots::FALLBACK_PATHS;
use sitemap_auditor::sitemap::{ResolvedBy, SourceParser};
use sitemap_auditor::storage::{AuditStatus, AuditStorage};
use sitemap_auditor::{AnalysisOutcome, AuditError, Origin};
use wiremock::MockServer;

fn analyzer() -> Analyzer {
    Analyzer::with_fetcher(test_fetcher(), &AnalysisConfig::default())
}

fn urls(base: &str, paths: &[&str]) -> Vec<String> {
    paths.iter().map(|p| format!("{}{}", base, p)).collect()
}

/// A small site: the root links to /about, /hidden is declared but unlinked,
/// /gone is declared but does not exist.
async fn mount_small_site(server: &MockServer) -> String {
    let base = server.uri();
    let declared = urls(&base, &["/", "/about", "/hidden", "/gone"]);

    mount_xml(server, "/sitemap.xml", &urlset(&declared)).await;
    mount_html(server, "/", &page(Some("Home page"), &["/about"])).await;
    mount_html(server, "/about", &page(None, &["/"])).await;
    mount_html(server, "/hidden", &page(Some("Hidden page"), &[])).await;

    base
}

#[tokio::test]
async fn test_full_audit() {
    let server = MockServer::start().await;
    let base = mount_small_site(&server).await;

    let report = analyzer()
        .analyze(&format!("{}/sitemap.xml", base))
        .await
        .unwrap();

    assert_eq!(report.sitemap_url, format!("{}/sitemap.xml", base));
    assert_eq!(report.resolved_by, ResolvedBy::Direct);
    assert_eq!(report.declared_urls, 4);

    assert_eq!(report.broken_links.len(), 1);
    assert_eq!(report.broken_links[0].url, format!("{}/gone", base));
    assert_eq!(report.broken_links[0].status, LinkStatus::Http(404));

    let mut orphans = report.orphan_pages.clone();
    orphans.sort();
    assert_eq!(orphans, urls(&base, &["/gone", "/hidden"]));

    let mut seo: Vec<(String, SeoIssueKind)> = report
        .seo_issues
        .iter()
        .map(|issue| (issue.url.clone(), issue.issue))
        .collect();
    seo.sort_by(|a, b| a.0.cmp(&b.0));
    assert_eq!(
        seo,
        vec![
            (format!("{}/about", base), SeoIssueKind::MissingMetaDescription),
            (format!("{}/gone", base), SeoIssueKind::FetchError),
        ]
    );

    assert!(report.crawl_failures.is_empty());
    assert!(!report.crawl_truncated);
    assert!(report.finished_at >= report.started_at);
}

#[tokio::test]
async fn test_no_orphans_when_everything_is_linked() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_xml(&server, "/sitemap.xml", &urlset(&urls(&base, &["/", "/a", "/b"]))).await;
    mount_html(&server, "/", &page(Some("Root"), &["/a"])).await;
    mount_html(&server, "/a", &page(Some("A"), &["/b"])).await;
    mount_html(&server, "/b", &page(Some("B"), &[])).await;

    let report = analyzer().analyze(&base).await.unwrap();

    assert_eq!(report.resolved_by, ResolvedBy::CommonPath);
    assert!(report.orphan_pages.is_empty());
    assert!(report.broken_links.is_empty());
    assert!(report.seo_issues.is_empty());
    assert!(report.is_clean());
}

#[tokio::test]
async fn test_linked_urls_match_declared_spelling() {
    let server = MockServer::start().await;
    let base = server.uri();

    // The bare origin has no trailing slash, exactly as the page links it
    let declared = vec![base.clone(), format!("{}/about", base)];
    mount_xml(&server, "/sitemap.xml", &urlset(&declared)).await;
    mount_html(&server, "/", &page(Some("Home"), &[base.as_str(), "/about"])).await;
    mount_html(&server, "/about", &page(Some("About"), &[])).await;

    let report = analyzer()
        .analyze(&format!("{}/sitemap.xml", base))
        .await
        .unwrap();

    assert!(report.orphan_pages.is_empty(), "{:?}", report.orphan_pages);
    assert!(report.broken_links.is_empty());
}

#[tokio::test]
async fn test_index_members_are_concatenated() {
    let server = MockServer::start().await;
    let base = server.uri();

    let first = urls(&base, &["/1", "/2", "/3"]);
    // Overlaps with the first leaf; duplicates are kept
    let second = urls(&base, &["/3", "/4", "/5", "/6", "/7"]);

    mount_xml(
        &server,
        "/sitemap.xml",
        &sitemap_index(&urls(&base, &["/sitemap-a.xml", "/sitemap-b.xml"])),
    )
    .await;
    mount_xml(&server, "/sitemap-a.xml", &urlset(&first)).await;
    mount_xml(&server, "/sitemap-b.xml", &urlset(&second)).await;

    let discovery = analyzer()
        .discover(&format!("{}/sitemap.xml", base))
        .await
        .unwrap();

    assert_eq!(discovery.declared_urls.len(), 8);
    assert_eq!(discovery.declared_urls[..3], first[..]);
    assert_eq!(discovery.declared_urls[3..], second[..]);
}

#[tokio::test]
async fn test_index_skips_failed_and_repeated_members() {
    let server = MockServer::start().await;
    let base = server.uri();

    let leaf = urls(&base, &["/x", "/y"]);
    mount_xml(
        &server,
        "/sitemap.xml",
        &sitemap_index(&urls(
            &base,
            &["/sitemap.xml", "/missing.xml", "/broken.xml", "/nested.xml"],
        )),
    )
    .await;
    mount_xml(&server, "/broken.xml", "<urlset><url><loc>oops</url></urlset>").await;
    mount_xml(
        &server,
        "/nested.xml",
        &sitemap_index(&urls(&base, &["/leaf.xml", "/nested.xml"])),
    )
    .await;
    mount_xml(&server, "/leaf.xml", &urlset(&leaf)).await;

    let discovery = analyzer()
        .discover(&format!("{}/sitemap.xml", base))
        .await
        .unwrap();

    assert_eq!(discovery.declared_urls, leaf);
}

#[tokio::test]
async fn test_robots_directives_become_declared_urls() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_text(
        &server,
        "/robots.txt",
        "User-agent: *\nDisallow: /admin/\nAllow: /public/\n",
    )
    .await;

    let discovery = analyzer().discover(&base).await.unwrap();

    assert_eq!(discovery.source.resolved_by, ResolvedBy::RobotsFallback);
    assert_eq!(discovery.source.url, format!("{}/robots.txt", base));
    assert_eq!(discovery.declared_urls, urls(&base, &["/admin/", "/public/"]));
}

#[tokio::test]
async fn test_robots_seed_full_audit() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_text(
        &server,
        "/robots.txt",
        "User-agent: *\nDisallow: /private/\nAllow: /blog/\n",
    )
    .await;
    mount_html(&server, "/", &page(Some("Home"), &["/blog/"])).await;
    mount_html(&server, "/blog/", &page(Some("Blog"), &["/"])).await;

    let seed = format!("{}/robots.txt", base);
    let report = analyzer().analyze(&seed).await.unwrap();

    assert_eq!(report.resolved_by, ResolvedBy::RobotsFallback);
    assert_eq!(report.sitemap_url, seed);
    assert_eq!(report.declared_urls, 2);

    assert_eq!(report.broken_links.len(), 1);
    assert_eq!(report.broken_links[0].url, format!("{}/private/", base));
    assert_eq!(report.broken_links[0].status, LinkStatus::Http(404));

    assert_eq!(report.orphan_pages, urls(&base, &["/private/"]));

    assert_eq!(report.seo_issues.len(), 1);
    assert_eq!(report.seo_issues[0].url, format!("{}/private/", base));
    assert_eq!(report.seo_issues[0].issue, SeoIssueKind::FetchError);
}

#[tokio::test]
async fn test_robots_without_candidates_uses_fallback_list() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_text(&server, "/robots.txt", "User-agent: *\nDisallow: /\n").await;

    let discovery = analyzer().discover(&base).await.unwrap();

    assert_eq!(discovery.declared_urls, urls(&base, &FALLBACK_PATHS));
}

#[tokio::test]
async fn test_robots_sitemap_references_are_followed() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_xml(&server, "/pages.xml", &urlset(&urls(&base, &["/p1", "/p2"]))).await;
    mount_html(&server, "/not-a-sitemap", "<html></html>").await;

    let robots = format!(
        "User-agent: *\nDisallow: /tmp\nSitemap: {base}/pages.xml\nSitemap: {base}/not-a-sitemap\n"
    );
    let origin = Origin::parse(&base).unwrap();
    let fetcher = test_fetcher();

    let declared = SourceParser::new(&fetcher, &origin)
        .parse(&robots, "text/plain", &format!("{}/robots.txt", base))
        .await
        .unwrap();

    assert_eq!(declared, urls(&base, &["/tmp", "/p1", "/p2"]));
}

#[tokio::test]
async fn test_empty_sitemap_is_fatal() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_xml(&server, "/sitemap.xml", &urlset(&[])).await;

    let result = analyzer().analyze(&format!("{}/sitemap.xml", base)).await;
    assert!(matches!(result, Err(AuditError::NoUrls)));

    let outcome = analyzer()
        .analyze_outcome(&format!("{}/sitemap.xml", base))
        .await;
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json, serde_json::json!({ "error": "no URLs found" }));
}

#[tokio::test]
async fn test_unfetchable_source_is_fatal() {
    let server = MockServer::start().await;
    let base = server.uri();

    let outcome = analyzer().analyze_outcome(&base).await;

    match outcome {
        AnalysisOutcome::Error { error } => {
            assert!(error.starts_with("Error fetching sitemap"), "{}", error);
            assert!(error.contains("404"), "{}", error);
        }
        AnalysisOutcome::Report(_) => panic!("expected an error outcome"),
    }
}

#[tokio::test]
async fn test_malformed_source_is_fatal() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_xml(&server, "/sitemap.xml", "<urlset><url><loc>oops</url></urlset>").await;

    let result = analyzer().analyze(&format!("{}/sitemap.xml", base)).await;
    assert!(matches!(result, Err(AuditError::SitemapParse { .. })));
}

#[tokio::test]
async fn test_connection_errors_are_flagged() {
    let server = MockServer::start().await;
    let base = server.uri();

    let dead = "http://127.0.0.1:1/unreachable".to_string();
    let declared = vec![format!("{}/", base), dead.clone()];
    mount_xml(&server, "/sitemap.xml", &urlset(&declared)).await;
    mount_html(&server, "/", &page(Some("Home"), &[])).await;

    let report = analyzer().analyze(&base).await.unwrap();

    assert_eq!(report.broken_links.len(), 1);
    assert_eq!(report.broken_links[0].url, dead);
    assert_eq!(report.broken_links[0].status, LinkStatus::ConnectionError);

    assert_eq!(report.seo_issues.len(), 1);
    assert_eq!(report.seo_issues[0].issue, SeoIssueKind::FetchError);

    assert_eq!(report.orphan_pages, vec![dead]);
}

#[tokio::test]
async fn test_audit_is_recorded() {
    let server = MockServer::start().await;
    let base = mount_small_site(&server).await;
    let seed = format!("{}/sitemap.xml", base);

    let outcome = analyzer().analyze_outcome(&seed).await;
    let report = outcome.report().cloned().unwrap();

    let db = tempfile::NamedTempFile::new().unwrap();
    let mut storage = AuditStorage::new(db.path()).unwrap();
    let audit_id = storage
        .record_audit(&seed, None, report.started_at, report.finished_at, &outcome)
        .unwrap();

    let audits = storage.list_audits().unwrap();
    assert_eq!(audits.len(), 1);
    assert_eq!(audits[0].id, audit_id);
    assert_eq!(audits[0].status, AuditStatus::Completed);
    assert_eq!(audits[0].declared_count, Some(4));

    let findings = storage.findings_for(audit_id).unwrap();
    assert_eq!(findings.len(), report.issue_count());
}
