//! Database schema definitions
//!
//! This module contains the SQL schema for the audit history database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- One row per audit run
CREATE TABLE IF NOT EXISTS audits (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    seed_url TEXT NOT NULL,
    sitemap_url TEXT,
    started_at TEXT NOT NULL,
    finished_at TEXT NOT NULL,
    config_hash TEXT,
    status TEXT NOT NULL,
    error_message TEXT,
    declared_count INTEGER
);

CREATE INDEX IF NOT EXISTS idx_audits_seed ON audits(seed_url);

-- Flagged entries of a completed audit
CREATE TABLE IF NOT EXISTS findings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    audit_id INTEGER NOT NULL REFERENCES audits(id),
    kind TEXT NOT NULL,
    url TEXT NOT NULL,
    detail TEXT
);

CREATE INDEX IF NOT EXISTS idx_findings_audit ON findings(audit_id);
CREATE INDEX IF NOT EXISTS idx_findings_kind ON findings(kind);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
