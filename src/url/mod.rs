//! URL handling module
//!
//! This module provides seed URL parsing, origin derivation, and the
//! same-origin test that bounds the crawler.

mod origin;
mod seed;

pub use origin::Origin;
pub use seed::parse_seed;

use serde::{Deserialize, Serialize};

/// How the crawler decides whether a discovered link belongs to the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginMatch {
    /// Compare parsed scheme, host, and port
    #[default]
    Structural,
    /// Accept any link whose string starts with the origin string.
    ///
    /// Loose: `https://example.com.evil.net/` passes for `https://example.com`.
    Prefix,
}

impl OriginMatch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Structural => "structural",
            Self::Prefix => "prefix",
        }
    }
}
