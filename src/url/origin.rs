use crate::url::OriginMatch;
use crate::{UrlError, UrlResult};
use std::fmt;
use url::Url;

/// Scheme, host, and port of a site
///
/// Derived once from the seed URL. The string form has no trailing slash
/// (`https://example.com`, `http://127.0.0.1:8080`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    /// The site root, always with an empty path (`https://example.com/`)
    root: Url,
}

impl Origin {
    /// Derives the origin of a URL
    ///
    /// # Examples
    ///
    /// ```
    /// use url::Url;
    /// use sitemap_auditor::Origin;
    ///
    /// let url = Url::parse("https://Example.com/blog/post?id=1").unwrap();
    /// let origin = Origin::from_url(&url).unwrap();
    /// assert_eq!(origin.to_string(), "https://example.com");
    /// assert_eq!(origin.root_url().as_str(), "https://example.com/");
    /// ```
    pub fn from_url(url: &Url) -> UrlResult<Self> {
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(url.scheme().to_string()));
        }

        let host = url.host_str().ok_or(UrlError::MissingHost)?;
        let root = match url.port() {
            Some(port) => format!("{}://{}:{}/", url.scheme(), host, port),
            None => format!("{}://{}/", url.scheme(), host),
        };
        let root = Url::parse(&root).map_err(|e| UrlError::Parse(e.to_string()))?;

        Ok(Self { root })
    }

    /// Parses a URL string and derives its origin
    pub fn parse(url: &str) -> UrlResult<Self> {
        let url = Url::parse(url).map_err(|e| UrlError::Parse(e.to_string()))?;
        Self::from_url(&url)
    }

    /// The site root (`{origin}/`), where crawling starts
    pub fn root_url(&self) -> &Url {
        &self.root
    }

    /// Resolves a path against the origin
    pub fn join(&self, path: &str) -> UrlResult<Url> {
        self.root
            .join(path)
            .map_err(|e| UrlError::Parse(format!("{}: {}", path, e)))
    }

    /// `{origin}/robots.txt`
    pub fn robots_url(&self) -> Url {
        let mut url = self.root.clone();
        url.set_path("/robots.txt");
        url
    }

    /// Checks whether a URL belongs to this origin under the given rule
    pub fn matches(&self, url: &Url, mode: OriginMatch) -> bool {
        match mode {
            OriginMatch::Structural => url.origin() == self.root.origin(),
            OriginMatch::Prefix => url.as_str().starts_with(&self.to_string()),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.root.as_str().trim_end_matches('/'))
    }
}
