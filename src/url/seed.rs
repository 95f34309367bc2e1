use crate::{UrlError, UrlResult};
use url::Url;

/// Parses the seed URL supplied by the caller
///
/// # Rules
///
/// 1. Surrounding whitespace is trimmed
/// 2. A seed without a scheme (`example.com`) is treated as `https://example.com`
/// 3. Only HTTP and HTTPS are accepted
/// 4. The URL must have a host
///
/// Nothing else is rewritten: paths, trailing slashes, and query strings are
/// kept exactly as given.
///
/// # Examples
///
/// ```
/// use sitemap_auditor::parse_seed;
///
/// let url = parse_seed("example.com").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/");
///
/// let url = parse_seed("https://example.com/sitemap.xml").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/sitemap.xml");
/// ```
pub fn parse_seed(seed: &str) -> UrlResult<Url> {
    let seed = seed.trim();
    if seed.is_empty() {
        return Err(UrlError::Parse("empty seed URL".to_string()));
    }

    let with_scheme = if seed.contains("://") {
        seed.to_string()
    } else {
        format!("https://{}", seed)
    };

    let url = Url::parse(&with_scheme).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}
