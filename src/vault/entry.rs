//! Bounded field types and the `VaultEntry` record.
//!
//! The registry stores each entry as a single `filename password` line,
//! so neither field may contain whitespace and both are capped at
//! `MAX_FIELD_LEN` bytes.  Values that break these rules are rejected at
//! construction time instead of being silently truncated.

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::{FileVaultError, Result};

/// Maximum length in bytes of a filename or password.
pub const MAX_FIELD_LEN: usize = 99;

/// Shared checks for both field kinds.
fn check_token(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(FileVaultError::InvalidField {
            field,
            reason: "cannot be empty".into(),
        });
    }
    if value.len() > MAX_FIELD_LEN {
        return Err(FileVaultError::InvalidField {
            field,
            reason: format!("cannot exceed {MAX_FIELD_LEN} bytes"),
        });
    }
    if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(FileVaultError::InvalidField {
            field,
            reason: "cannot contain whitespace or control characters".into(),
        });
    }
    Ok(())
}

/// Name of a managed file, relative to the vault's data directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Filename(String);

impl Filename {
    /// Validate and wrap a user-supplied filename.
    ///
    /// Managed files live flat in the data directory, so path separators
    /// and the `.`/`..` components are refused as well.
    pub fn parse(value: &str) -> Result<Self> {
        check_token("filename", value)?;
        if value.contains('/') || value.contains('\\') {
            return Err(FileVaultError::InvalidField {
                field: "filename",
                reason: format!("'{value}' cannot contain path separators"),
            });
        }
        if value == "." || value == ".." {
            return Err(FileVaultError::InvalidField {
                field: "filename",
                reason: format!("'{value}' is not a file name"),
            });
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Filename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Filename {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A plain-text password, wiped from memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
    /// Validate and wrap a user-supplied password.
    pub fn parse(value: &str) -> Result<Self> {
        check_token("password", value)?;
        Ok(Self(value.to_string()))
    }

    /// Exact, case-sensitive comparison against a candidate.
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.as_bytes().ct_eq(candidate.as_bytes()).into()
    }

    /// The raw password text, as written to the registry file.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

/// A registered (filename, password) pair.
#[derive(Debug, Clone)]
pub struct VaultEntry {
    pub filename: Filename,
    pub password: Password,
}

impl VaultEntry {
    pub fn new(filename: Filename, password: Password) -> Self {
        Self { filename, password }
    }
}
