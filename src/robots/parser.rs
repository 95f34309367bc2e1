//! Robots.txt parser implementation
//!
//! This module mines robots.txt content for URL candidates using the
//! robotstxt crate's tokenizer. Directives are only collected here, never
//! enforced: an `Allow` and a `Disallow` path are treated the same way.

use crate::url::Origin;
use robotstxt::{parse_robotstxt, RobotsParseHandler};
use url::Url;

/// A robots.txt line the auditor cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Allow(String),
    Disallow(String),
    Sitemap(String),
}

/// Directives of one robots.txt file, in line order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RobotsDirectives {
    directives: Vec<Directive>,
}

/// Collects directives as the tokenizer reports them
#[derive(Default)]
struct DirectiveCollector {
    directives: Vec<Directive>,
}

impl RobotsParseHandler for DirectiveCollector {
    fn handle_robots_start(&mut self) {}

    fn handle_robots_end(&mut self) {}

    fn handle_user_agent(&mut self, _line_num: u32, _user_agent: &str) {}

    fn handle_allow(&mut self, _line_num: u32, value: &str) {
        self.directives.push(Directive::Allow(value.to_string()));
    }

    fn handle_disallow(&mut self, _line_num: u32, value: &str) {
        self.directives.push(Directive::Disallow(value.to_string()));
    }

    fn handle_sitemap(&mut self, _line_num: u32, value: &str) {
        self.directives.push(Directive::Sitemap(value.to_string()));
    }

    fn handle_unknown_action(&mut self, _line_num: u32, _action: &str, _value: &str) {}
}

impl RobotsDirectives {
    /// Parses raw robots.txt content
    ///
    /// Keys are matched case-insensitively and comments are stripped.
    /// User-agent grouping is ignored.
    pub fn parse(content: &str) -> Self {
        let mut collector = DirectiveCollector::default();
        parse_robotstxt(content, &mut collector);
        Self {
            directives: collector.directives,
        }
    }

    /// All collected directives, in line order
    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// Values of `Sitemap:` lines, in line order
    pub fn sitemaps(&self) -> Vec<&str> {
        self.directives
            .iter()
            .filter_map(|directive| match directive {
                Directive::Sitemap(value) if !value.is_empty() => Some(value.as_str()),
                _ => None,
            })
            .collect()
    }

    /// `Allow`/`Disallow` paths usable as page candidates, resolved against the origin
    ///
    /// Paths are kept in line order. Duplicates are not removed.
    pub fn candidate_urls(&self, origin: &Origin) -> Vec<Url> {
        self.directives
            .iter()
            .filter_map(|directive| match directive {
                Directive::Allow(path) | Directive::Disallow(path) => Some(path.as_str()),
                Directive::Sitemap(_) => None,
            })
            .filter(|path| is_candidate_path(path))
            .filter_map(|path| match origin.join(path) {
                Ok(url) => Some(url),
                Err(e) => {
                    tracing::debug!("Skipping robots path {}: {}", path, e);
                    None
                }
            })
            .collect()
    }
}

/// A directive path is a candidate unless it is empty, the bare root, or a wildcard pattern
pub fn is_candidate_path(path: &str) -> bool {
    !path.is_empty() && path != "/" && !path.starts_with('*')
}
