//! The persistent registry of managed files.
//!
//! `RegistryStore` keeps every `VaultEntry` in memory and mirrors the
//! full list to the registry file after each mutation.  The managed
//! files themselves live in the data directory next to it.

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::audit;
use crate::config::CONFIG_FILE_NAME;
use crate::errors::{FileVaultError, Result};

use super::entry::{Filename, Password, VaultEntry};
use super::format;

/// Default maximum number of registered files.
pub const MAX_ENTRIES: usize = 100;

/// The registry handle.  Build one with `RegistryStore::load`.
pub struct RegistryStore {
    /// Path to the registry file on disk.
    path: PathBuf,

    /// Directory holding the managed files.
    data_dir: PathBuf,

    /// Registered entries, in registration order.
    entries: Vec<VaultEntry>,

    /// Maximum number of entries.
    capacity: usize,
}

impl RegistryStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Load the registry from `path`.
    ///
    /// A missing or malformed registry file is not an error: the store
    /// simply starts with whatever could be read (possibly nothing).
    pub fn load(path: &Path, data_dir: &Path, capacity: usize) -> Self {
        let entries = format::read_registry(path, capacity);
        Self {
            path: path.to_path_buf(),
            data_dir: data_dir.to_path_buf(),
            entries,
            capacity,
        }
    }

    // ------------------------------------------------------------------
    // Entry operations
    // ------------------------------------------------------------------

    /// Register a new file and create it empty on disk.
    ///
    /// Checks run in order: capacity, duplicate name, field validation,
    /// reserved names, file creation.  On success the registry file is
    /// rewritten.  If that rewrite fails the entry stays registered in
    /// memory and `RegistryWriteFailed` is returned.
    pub fn add_entry(&mut self, filename: &str, password: &str) -> Result<()> {
        if self.entries.len() >= self.capacity {
            return Err(FileVaultError::VaultFull(self.capacity));
        }
        if self.contains(filename) {
            return Err(FileVaultError::AlreadyExists(filename.to_string()));
        }

        let filename = Filename::parse(filename)?;
        let password = Password::parse(password)?;
        self.check_not_reserved(&filename)?;

        // Creating truncates any unregistered file of the same name.
        File::create(self.file_path(&filename)).map_err(|source| {
            FileVaultError::CreateError {
                filename: filename.to_string(),
                source,
            }
        })?;

        self.entries.push(VaultEntry::new(filename, password));
        self.save()
    }

    /// Check `password` against the registered one.
    ///
    /// Returns `Ok(false)` for a wrong password and `NotFound` when the
    /// filename is not registered, so an empty password works as an
    /// existence check.
    pub fn verify_password(&self, filename: &str, password: &str) -> Result<bool> {
        let entry = self
            .find(filename)
            .ok_or_else(|| FileVaultError::NotFound(filename.to_string()))?;
        Ok(entry.password.matches(password))
    }

    /// Replace the password after checking the old one.
    pub fn change_password(
        &mut self,
        filename: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<()> {
        let index = self
            .entries
            .iter()
            .position(|e| e.filename.as_str() == filename)
            .ok_or_else(|| FileVaultError::NotFound(filename.to_string()))?;

        if !self.entries[index].password.matches(old_password) {
            return Err(FileVaultError::WrongPassword);
        }

        self.entries[index].password = Password::parse(new_password)?;
        self.save()
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Rewrite the full registry file.
    pub fn save(&self) -> Result<()> {
        format::write_registry(&self.path, &self.entries).map_err(|source| {
            FileVaultError::RegistryWriteFailed {
                path: self.path.clone(),
                source,
            }
        })
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns `true` if `filename` is registered.
    pub fn contains(&self, filename: &str) -> bool {
        self.find(filename).is_some()
    }

    /// Returns the number of registered files.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the directory holding the managed files.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// On-disk location of a managed file.
    pub fn file_path(&self, filename: &Filename) -> PathBuf {
        self.data_dir.join(filename.as_str())
    }

    fn find(&self, filename: &str) -> Option<&VaultEntry> {
        self.entries.iter().find(|e| e.filename.as_str() == filename)
    }

    /// A managed file must never alias one of the tool's own files in
    /// the data directory: the registry, its rewrite scratch file, the
    /// project config, or the audit database and its SQLite journals.
    fn check_not_reserved(&self, filename: &Filename) -> Result<()> {
        let target = self.file_path(filename);
        let reserved_for = if target == self.path {
            Some("the registry")
        } else if target == format::temp_path(&self.path) {
            Some("registry rewrites")
        } else if filename.as_str() == CONFIG_FILE_NAME {
            Some("project settings")
        } else if filename.as_str().starts_with(audit::DB_FILE_NAME) {
            Some("the audit log")
        } else {
            None
        };

        match reserved_for {
            Some(what) => Err(FileVaultError::InvalidField {
                field: "filename",
                reason: format!("'{filename}' is reserved for {what}"),
            }),
            None => Ok(()),
        }
    }
}
