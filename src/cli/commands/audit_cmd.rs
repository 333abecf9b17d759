//! `filevault audit` — show who did what to which managed file.
//!
//!   filevault audit                        # last 50 operations
//!   filevault audit --file notes.txt       # one file's history
//!   filevault audit --since 24h --last 10

use chrono::{DateTime, Duration, Utc};
use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::audit::{AuditEntry, AuditFilter, AuditLog};
use crate::cli::output;
use crate::cli::{project_dir, Cli};
use crate::config::Settings;
use crate::errors::{FileVaultError, Result};

/// Execute the `audit` command.
pub fn execute(
    cli: &Cli,
    last: usize,
    since: Option<DateTime<Utc>>,
    file: Option<&str>,
) -> Result<()> {
    let dir = project_dir(cli)?;
    let settings = Settings::load(&dir)?;
    let data_dir = settings.data_path(&dir);

    let audit = AuditLog::open(&data_dir).ok_or_else(|| {
        FileVaultError::AuditError(format!("cannot open audit log in {}", data_dir.display()))
    })?;

    let entries = audit.query(&AuditFilter {
        limit: last,
        since,
        filename: file.map(str::to_string),
    })?;

    match (entries.is_empty(), file) {
        (true, Some(name)) => output::info(&format!("No recorded operations on '{name}'.")),
        (true, None) => output::info("No recorded operations yet."),
        (false, _) => print_history(&entries),
    }
    Ok(())
}

/// Turn an age such as `7d`, `24h` or `30m` into the cutoff instant.
pub fn parse_since(age: &str) -> Result<DateTime<Utc>> {
    let age = age.trim();
    let invalid =
        || FileVaultError::CommandFailed(format!("invalid age '{age}' (try 7d, 24h or 30m)"));

    let unit_at = age.len().checked_sub(1).ok_or_else(invalid)?;
    if !age.is_char_boundary(unit_at) {
        return Err(invalid());
    }
    let (count, unit) = age.split_at(unit_at);
    let count: i64 = count.parse().map_err(|_| invalid())?;
    if count < 0 {
        return Err(invalid());
    }

    let span = match unit {
        "d" => Duration::days(count),
        "h" => Duration::hours(count),
        "m" => Duration::minutes(count),
        _ => return Err(invalid()),
    };
    Ok(Utc::now() - span)
}

fn print_history(entries: &[AuditEntry]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["When", "Operation", "File", "Details"]);

    for entry in entries {
        table.add_row(vec![
            entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            operation_label(&entry.operation),
            entry.filename.clone().unwrap_or_else(|| "-".into()),
            entry.details.clone().unwrap_or_else(|| "-".into()),
        ]);
    }

    println!("{}", style(format!("{} operation(s):", entries.len())).bold());
    println!("{table}");
}

/// Denied access stands out; writes and their undo are highlighted.
fn operation_label(op: &str) -> String {
    let styled = match op {
        "access-denied" => style(op).red().bold(),
        "append" | "add" => style(op).green(),
        "undo" => style(op).magenta(),
        "passwd" => style(op).yellow(),
        _ => style(op),
    };
    styled.to_string()
}
