//! SQLite storage implementation
//!
//! This module provides the SQLite-backed audit history.

use crate::analysis::AnalysisOutcome;
use crate::storage::schema::initialize_schema;
use crate::storage::{
    AuditRecord, AuditStatus, FindingKind, FindingRecord, StorageError, StorageResult,
};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

/// SQLite audit history
pub struct AuditStorage {
    conn: Connection,
}

impl AuditStorage {
    /// Opens or creates the database at `path`
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Stores an audit and, for a completed report, all of its findings
    ///
    /// Returns the new audit id. The write is a single transaction.
    pub fn record_audit(
        &mut self,
        seed_url: &str,
        config_hash: Option<&str>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        outcome: &AnalysisOutcome,
    ) -> StorageResult<i64> {
        let tx = self.conn.transaction()?;

        let audit_id = match outcome {
            AnalysisOutcome::Error { error } => {
                tx.execute(
                    "INSERT INTO audits (seed_url, started_at, finished_at, config_hash, status, error_message)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        seed_url,
                        started_at.to_rfc3339(),
                        finished_at.to_rfc3339(),
                        config_hash,
                        AuditStatus::Failed.to_db_string(),
                        error
                    ],
                )?;
                tx.last_insert_rowid()
            }
            AnalysisOutcome::Report(report) => {
                tx.execute(
                    "INSERT INTO audits (seed_url, sitemap_url, started_at, finished_at, config_hash, status, declared_count)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        seed_url,
                        report.sitemap_url,
                        report.started_at.to_rfc3339(),
                        report.finished_at.to_rfc3339(),
                        config_hash,
                        AuditStatus::Completed.to_db_string(),
                        report.declared_urls as i64
                    ],
                )?;
                let audit_id = tx.last_insert_rowid();

                {
                    let mut stmt = tx.prepare(
                        "INSERT INTO findings (audit_id, kind, url, detail) VALUES (?1, ?2, ?3, ?4)",
                    )?;

                    for link in &report.broken_links {
                        stmt.execute(params![
                            audit_id,
                            FindingKind::BrokenLink.to_db_string(),
                            link.url,
                            link.status.label()
                        ])?;
                    }
                    for url in &report.orphan_pages {
                        stmt.execute(params![
                            audit_id,
                            FindingKind::Orphan.to_db_string(),
                            url,
                            None::<String>
                        ])?;
                    }
                    for issue in &report.seo_issues {
                        stmt.execute(params![
                            audit_id,
                            FindingKind::Seo.to_db_string(),
                            issue.url,
                            issue.issue.as_str()
                        ])?;
                    }
                    for failure in &report.crawl_failures {
                        stmt.execute(params![
                            audit_id,
                            FindingKind::CrawlFailure.to_db_string(),
                            failure.url,
                            failure.reason
                        ])?;
                    }
                }

                audit_id
            }
        };

        tx.commit()?;
        tracing::debug!("Recorded audit {} for {}", audit_id, seed_url);
        Ok(audit_id)
    }

    /// Gets one audit by id
    pub fn get_audit(&self, audit_id: i64) -> StorageResult<AuditRecord> {
        self.conn
            .query_row(
                "SELECT id, seed_url, sitemap_url, started_at, finished_at, config_hash, status, error_message, declared_count
                 FROM audits WHERE id = ?1",
                params![audit_id],
                audit_from_row,
            )
            .optional()?
            .ok_or(StorageError::AuditNotFound(audit_id))
    }

    /// Lists all audits, newest first
    pub fn list_audits(&self) -> StorageResult<Vec<AuditRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, seed_url, sitemap_url, started_at, finished_at, config_hash, status, error_message, declared_count
             FROM audits ORDER BY id DESC",
        )?;

        let audits = stmt
            .query_map([], audit_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(audits)
    }

    /// Gets the findings of an audit in insertion order
    pub fn findings_for(&self, audit_id: i64) -> StorageResult<Vec<FindingRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT audit_id, kind, url, detail FROM findings WHERE audit_id = ?1 ORDER BY id",
        )?;

        let mut findings = Vec::new();
        let rows = stmt.query_map(params![audit_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
            ))
        })?;

        for row in rows {
            let (audit_id, kind, url, detail) = row?;
            match FindingKind::from_db_string(&kind) {
                Some(kind) => findings.push(FindingRecord {
                    audit_id,
                    kind,
                    url,
                    detail,
                }),
                None => tracing::warn!("Unknown finding kind '{}' in audit {}", kind, audit_id),
            }
        }

        Ok(findings)
    }
}

fn audit_from_row(row: &Row<'_>) -> rusqlite::Result<AuditRecord> {
    Ok(AuditRecord {
        id: row.get(0)?,
        seed_url: row.get(1)?,
        sitemap_url: row.get(2)?,
        started_at: row.get(3)?,
        finished_at: row.get(4)?,
        config_hash: row.get(5)?,
        status: AuditStatus::from_db_string(&row.get::<_, String>(6)?)
            .unwrap_or(AuditStatus::Failed),
        error_message: row.get(7)?,
        declared_count: row.get::<_, Option<i64>>(8)?.map(|count| count as u64),
    })
}
