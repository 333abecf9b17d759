//! Plain-text registry file format.
//!
//! A registry file has one record per line:
//!
//! ```text
//! <filename> <password>
//! ```
//!
//! - Tokens are separated by whitespace and may not contain any.
//! - Each token is at most 99 bytes.
//! - The whole file is rewritten on every change; there is no journal.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::entry::{Filename, Password, VaultEntry};

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse registry text into entries, keeping at most `max_entries`.
///
/// Blank lines are skipped.  Parsing stops at the first malformed line;
/// records read before it are kept.  A repeated filename keeps its first
/// occurrence.
pub fn parse_registry(text: &str, max_entries: usize) -> Vec<VaultEntry> {
    let mut entries = Vec::new();
    let mut seen = HashSet::new();

    for line in text.lines() {
        if entries.len() >= max_entries {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let Some(entry) = parse_line(line) else {
            break;
        };

        if seen.insert(entry.filename.clone()) {
            entries.push(entry);
        }
    }

    entries
}

/// Parse one `filename password` line.
fn parse_line(line: &str) -> Option<VaultEntry> {
    let mut tokens = line.split_whitespace();
    let filename = tokens.next()?;
    let password = tokens.next()?;
    if tokens.next().is_some() {
        return None;
    }

    let filename = Filename::parse(filename).ok()?;
    let password = Password::parse(password).ok()?;
    Some(VaultEntry::new(filename, password))
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Render entries in registration order, one line each.
pub fn render_registry(entries: &[VaultEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(entry.filename.as_str());
        out.push(' ');
        out.push_str(entry.password.expose());
        out.push('\n');
    }
    out
}

/// Read the registry at `path`.
///
/// A missing, unreadable, or non-UTF-8 file yields an empty registry.
pub fn read_registry(path: &Path, max_entries: usize) -> Vec<VaultEntry> {
    match fs::read_to_string(path) {
        Ok(text) => parse_registry(&text, max_entries),
        Err(_) => Vec::new(),
    }
}

/// Rewrite the whole registry file **atomically**.
///
/// The content goes to a temp file in the same directory first and is
/// then renamed over `path`, so readers never see a half-written file.
pub fn write_registry(path: &Path, entries: &[VaultEntry]) -> std::io::Result<()> {
    let text = render_registry(entries);
    let tmp_path = temp_path(path);

    fs::write(&tmp_path, text.as_bytes())?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    Ok(())
}

/// Scratch file used while rewriting the registry at `path`.
pub fn temp_path(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or(Path::new("."));
    parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ))
}
