//! Plain-text rendering for the terminal

use crate::analysis::AnalysisReport;
use crate::storage::AuditRecord;

pub fn format_text_report(report: &AnalysisReport) -> String {
    let mut out = String::new();

    out.push_str("=== Sitemap Audit ===\n\n");
    out.push_str(&format!("Seed:            {}\n", report.seed_url));
    out.push_str(&format!(
        "Sitemap source:  {} ({})\n",
        report.sitemap_url, report.resolved_by
    ));
    out.push_str(&format!("Declared URLs:   {}\n", report.declared_urls));
    out.push_str(&format!(
        "Reachable pages: {}{}\n",
        report.reachable_pages,
        if report.crawl_truncated { " (crawl truncated)" } else { "" }
    ));
    out.push_str(&format!("Duration:        {:.2}s\n", report.duration_secs()));

    out.push_str(&format!("\nBroken links ({}):\n", report.broken_links.len()));
    for link in &report.broken_links {
        out.push_str(&format!("  {:>16}  {}\n", link.status.label(), link.url));
    }

    out.push_str(&format!("\nOrphan pages ({}):\n", report.orphan_pages.len()));
    for url in &report.orphan_pages {
        out.push_str(&format!("  {}\n", url));
    }

    out.push_str(&format!("\nSEO issues ({}):\n", report.seo_issues.len()));
    for issue in &report.seo_issues {
        out.push_str(&format!("  {:>24}  {}\n", issue.issue.as_str(), issue.url));
    }

    if !report.crawl_failures.is_empty() {
        out.push_str(&format!("\nCrawl failures ({}):\n", report.crawl_failures.len()));
        for failure in &report.crawl_failures {
            out.push_str(&format!("  {}  {}\n", failure.url, failure.reason));
        }
    }

    out
}

/// One line per stored audit, newest first
pub fn format_history(audits: &[AuditRecord]) -> String {
    if audits.is_empty() {
        return "No audits recorded.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:>5}  {:<25}  {:<9}  {:>8}  {}\n",
        "ID", "STARTED", "STATUS", "DECLARED", "SEED"
    ));
    for audit in audits {
        out.push_str(&format!(
            "{:>5}  {:<25}  {:<9}  {:>8}  {}\n",
            audit.id,
            audit.started_at,
            audit.status.to_db_string(),
            audit
                .declared_count
                .map(|count| count.to_string())
                .unwrap_or_else(|| "-".to_string()),
            audit.seed_url
        ));
        if let Some(message) = &audit.error_message {
            out.push_str(&format!("       error: {}\n", message));
        }
    }
    out
}
