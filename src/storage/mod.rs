//! Storage module for audit history
//!
//! This module persists finished audits to SQLite so runs against the same
//! site can be compared over time:
//! - One `audits` row per run, successful or not
//! - One `findings` row per flagged entry of a successful run

mod schema;
mod sqlite;

pub use schema::{initialize_schema, SCHEMA_SQL};
pub use sqlite::AuditStorage;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Audit not found: {0}")]
    AuditNotFound(i64),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Represents an audit run in the database
#[derive(Debug, Clone)]
pub struct AuditRecord {
    pub id: i64,
    pub seed_url: String,
    pub sitemap_url: Option<String>,
    pub started_at: String,
    pub finished_at: String,
    pub config_hash: Option<String>,
    pub status: AuditStatus,
    pub error_message: Option<String>,
    pub declared_count: Option<u64>,
}

/// Status of an audit run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditStatus {
    Completed,
    Failed,
}

impl AuditStatus {
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

/// Category of a stored finding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingKind {
    BrokenLink,
    Orphan,
    Seo,
    CrawlFailure,
}

impl FindingKind {
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::BrokenLink => "broken-link",
            Self::Orphan => "orphan",
            Self::Seo => "seo",
            Self::CrawlFailure => "crawl-failure",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "broken-link" => Some(Self::BrokenLink),
            "orphan" => Some(Self::Orphan),
            "seo" => Some(Self::Seo),
            "crawl-failure" => Some(Self::CrawlFailure),
            _ => None,
        }
    }
}

/// Represents one flagged entry of an audit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindingRecord {
    pub audit_id: i64,
    pub kind: FindingKind,
    pub url: String,
    /// Status label, issue name, or failure reason; none for orphans
    pub detail: Option<String>,
}
