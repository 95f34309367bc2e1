//! Orphan detection

use std::collections::HashSet;

/// Declared URLs that the crawl never reached
///
/// Membership is exact string equality. Declared order is kept and
/// duplicates in the declared list are reported once per occurrence.
pub fn find_orphans(declared: &[String], reachable: &HashSet<String>) -> Vec<String> {
    declared
        .iter()
        .filter(|url| !reachable.contains(url.as_str()))
        .cloned()
        .collect()
}
