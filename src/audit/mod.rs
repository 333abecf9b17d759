//! Audit log — SQLite-based operation history.
//!
//! Stores a record of every vault operation (add, access, append, undo,
//! etc.) in a local SQLite database at `<data_dir>/.filevault-audit.db`.
//! Passwords are never recorded.
//!
//! Designed for graceful degradation: if the database can't be opened or
//! written to, operations silently continue without logging.

use std::path::{Path, PathBuf};

/// File name of the audit database inside the data directory.
pub const DB_FILE_NAME: &str = ".filevault-audit.db";

/// Return the path to the audit database (for testing/display).
pub fn db_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DB_FILE_NAME)
}

#[cfg(feature = "audit-log")]
mod db;

#[cfg(feature = "audit-log")]
pub use db::{AuditEntry, AuditFilter, AuditLog};

/// Convenience helper: log an audit event for the vault in `data_dir`.
///
/// Opens the audit database, logs the event, and silently ignores any errors.
/// This is safe to call from any command — it never fails the parent operation.
#[cfg(feature = "audit-log")]
pub fn log_audit(data_dir: &Path, op: &str, filename: Option<&str>, details: Option<&str>) {
    if let Some(audit) = AuditLog::open(data_dir) {
        audit.log(op, filename, details);
    }
}

/// Audit logging is compiled out; events are dropped.
#[cfg(not(feature = "audit-log"))]
pub fn log_audit(_data_dir: &Path, _op: &str, _filename: Option<&str>, _details: Option<&str>) {}
