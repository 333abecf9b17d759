use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::errors::{FileVaultError, Result};

use super::db_path;

/// A single audit log entry.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub operation: String,
    pub filename: Option<String>,
    pub details: Option<String>,
}

/// Which audit entries to return.
#[derive(Debug, Clone)]
pub struct AuditFilter {
    /// Maximum number of entries.
    pub limit: usize,
    /// Only entries at or after this instant.
    pub since: Option<DateTime<Utc>>,
    /// Only entries about this managed file.
    pub filename: Option<String>,
}

impl AuditFilter {
    pub fn last(limit: usize) -> Self {
        Self {
            limit,
            since: None,
            filename: None,
        }
    }
}

/// SQLite-backed audit log.
pub struct AuditLog {
    conn: Connection,
}

impl AuditLog {
    /// Open (or create) the audit database inside `data_dir`.
    ///
    /// Returns `None` if the database can't be opened — callers should
    /// treat this as "audit logging unavailable" and continue normally.
    pub fn open(data_dir: &Path) -> Option<Self> {
        let path = db_path(data_dir);
        let conn = Connection::open(&path).ok()?;

        // Owner-only permissions on the audit database.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            let _ = std::fs::set_permissions(&path, perms);
        }

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS audit_log (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp   TEXT NOT NULL,
                operation   TEXT NOT NULL,
                filename    TEXT,
                details     TEXT
            );",
        )
        .ok()?;

        Some(Self { conn })
    }

    /// Record an operation. Fire-and-forget — errors are silently ignored.
    pub fn log(&self, operation: &str, filename: Option<&str>, details: Option<&str>) {
        let now = Utc::now().to_rfc3339();
        let _ = self.conn.execute(
            "INSERT INTO audit_log (timestamp, operation, filename, details)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![now, operation, filename, details],
        );
    }

    /// Entries matching `filter`, most recent first.
    pub fn query(&self, filter: &AuditFilter) -> Result<Vec<AuditEntry>> {
        let mut sql = String::from(
            "SELECT id, timestamp, operation, filename, details FROM audit_log WHERE 1 = 1",
        );
        let mut args: Vec<rusqlite::types::Value> = Vec::new();

        if let Some(since) = filter.since {
            args.push(since.to_rfc3339().into());
            sql.push_str(&format!(" AND timestamp >= ?{}", args.len()));
        }
        if let Some(ref filename) = filter.filename {
            args.push(filename.clone().into());
            sql.push_str(&format!(" AND filename = ?{}", args.len()));
        }
        args.push(i64::try_from(filter.limit).unwrap_or(i64::MAX).into());
        sql.push_str(&format!(" ORDER BY id DESC LIMIT ?{}", args.len()));

        let audit_err = |e: rusqlite::Error| FileVaultError::AuditError(e.to_string());
        let mut stmt = self.conn.prepare(&sql).map_err(audit_err)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(args), |row| {
                let stamp: String = row.get(1)?;
                Ok(AuditEntry {
                    id: row.get(0)?,
                    timestamp: DateTime::parse_from_rfc3339(&stamp)
                        .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc)),
                    operation: row.get(2)?,
                    filename: row.get(3)?,
                    details: row.get(4)?,
                })
            })
            .map_err(audit_err)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(audit_err)
    }
}
