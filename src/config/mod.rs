//! Configuration module
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A missing file is not an error for the binary: `Config::default()` is used.
//!
//! # Example
//!
//! ```no_run
//! use sitemap_auditor::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("auditor.toml")).unwrap();
//! println!("Worker pool width: {}", config.analysis.workers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{AnalysisConfig, Config, FetcherConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
