//! Sitemap discovery and parsing
//!
//! - [`SitemapLocator`] picks the document to audit from a seed URL
//! - [`SourceParser`] turns that document into the declared URL list
//! - [`parse_sitemap_xml`] reads a single sitemap or sitemap index

mod classifier;
mod locator;
mod xml;

pub use classifier::{classify, ContentKind, SourceParser};
pub use locator::{
    ResolvedBy, ResolvedSource, SitemapLocator, COMMON_SITEMAP_PATHS, SITEMAP_FILENAME,
};
pub use xml::{parse_sitemap_xml, SitemapDocument, SitemapKind};
