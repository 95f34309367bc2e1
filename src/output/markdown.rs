//! Markdown report generation
//!
//! This module renders an audit as a Markdown document: a run summary
//! followed by one section per finding category.

use crate::analysis::AnalysisReport;

/// Formats an audit report as markdown
///
/// Sections with no entries are written with a short "none" line so the
/// document always has the same outline.
pub fn format_markdown_report(report: &AnalysisReport) -> String {
    let mut md = String::new();

    md.push_str("# Sitemap Audit Report\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Seed**: {}\n", report.seed_url));
    md.push_str(&format!(
        "- **Sitemap Source**: {} ({})\n",
        report.sitemap_url, report.resolved_by
    ));
    md.push_str(&format!("- **Started**: {}\n", report.started_at.to_rfc3339()));
    md.push_str(&format!("- **Finished**: {}\n", report.finished_at.to_rfc3339()));
    md.push_str(&format!("- **Duration**: {:.2} seconds\n\n", report.duration_secs()));

    // Overall statistics
    md.push_str("## Summary\n\n");
    md.push_str("| Metric | Count |\n");
    md.push_str("|--------|-------|\n");
    md.push_str(&format!("| Declared URLs | {} |\n", report.declared_urls));
    md.push_str(&format!("| Reachable Pages | {} |\n", report.reachable_pages));
    md.push_str(&format!("| Broken Links | {} |\n", report.broken_links.len()));
    md.push_str(&format!("| Orphan Pages | {} |\n", report.orphan_pages.len()));
    md.push_str(&format!("| SEO Issues | {} |\n", report.seo_issues.len()));
    md.push_str(&format!(
        "| Crawl Failures | {} |\n\n",
        report.crawl_failures.len()
    ));

    if report.crawl_truncated {
        md.push_str("> The crawl stopped at the configured page limit; orphan results may include pages that are linked but were never reached.\n\n");
    }

    md.push_str("## Broken Links\n\n");
    if report.broken_links.is_empty() {
        md.push_str("None found.\n\n");
    } else {
        md.push_str("| URL | Status |\n");
        md.push_str("|-----|--------|\n");
        for link in &report.broken_links {
            md.push_str(&format!("| {} | {} |\n", link.url, link.status.label()));
        }
        md.push('\n');
    }

    md.push_str("## Orphan Pages\n\n");
    if report.orphan_pages.is_empty() {
        md.push_str("None found.\n\n");
    } else {
        for url in &report.orphan_pages {
            md.push_str(&format!("- {}\n", url));
        }
        md.push('\n');
    }

    md.push_str("## SEO Issues\n\n");
    if report.seo_issues.is_empty() {
        md.push_str("None found.\n\n");
    } else {
        md.push_str("| URL | Issue |\n");
        md.push_str("|-----|-------|\n");
        for issue in &report.seo_issues {
            md.push_str(&format!("| {} | {} |\n", issue.url, issue.issue.as_str()));
        }
        md.push('\n');
    }

    md.push_str("## Crawl Failures\n\n");
    if report.crawl_failures.is_empty() {
        md.push_str("None.\n");
    } else {
        for failure in &report.crawl_failures {
            md.push_str(&format!("- {}: {}\n", failure.url, failure.reason));
        }
    }

    md
}
