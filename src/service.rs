//! The vault service: registry, recent files, and undo in one handle.
//!
//! `VaultService` is what the CLI talks to.  It owns the registry store,
//! the recent-access ring, and the undo stack, and performs the raw
//! reads, appends, and truncations on managed files.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::errors::{FileVaultError, Result};
use crate::history::{RecentRing, UndoEntry, UndoStack};
use crate::vault::{Filename, RegistryStore};

pub struct VaultService {
    store: RegistryStore,
    recent: RecentRing,
    undo: UndoStack,
}

impl VaultService {
    /// Load the registry and start with an empty session history.
    pub fn init(settings: &Settings, project_dir: &Path) -> Self {
        let store = RegistryStore::load(
            &settings.registry_path(project_dir),
            &settings.data_path(project_dir),
            settings.max_entries,
        );
        Self::from_parts(
            store,
            RecentRing::new(settings.recent_capacity),
            UndoStack::new(settings.undo_capacity),
        )
    }

    /// Assemble a service from already-built parts.
    pub fn from_parts(store: RegistryStore, recent: RecentRing, undo: UndoStack) -> Self {
        Self {
            store,
            recent,
            undo,
        }
    }

    // ------------------------------------------------------------------
    // Registry operations
    // ------------------------------------------------------------------

    pub fn add_file(&mut self, filename: &str, password: &str) -> Result<()> {
        self.store.add_entry(filename, password)
    }

    /// `NotFound` here (even with an empty password) means the file is
    /// not registered; any other outcome means it is.
    pub fn verify_password(&self, filename: &str, password: &str) -> Result<bool> {
        self.store.verify_password(filename, password)
    }

    /// Check the password and, on success, mark the file as recently used.
    pub fn access_file(&mut self, filename: &str, password: &str) -> Result<()> {
        if !self.store.verify_password(filename, password)? {
            return Err(FileVaultError::WrongPassword);
        }
        self.recent.record_access(filename);
        Ok(())
    }

    pub fn change_password(
        &mut self,
        filename: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<()> {
        self.store
            .change_password(filename, old_password, new_password)
    }

    // ------------------------------------------------------------------
    // File contents
    // ------------------------------------------------------------------

    /// Read a whole managed file.
    ///
    /// `None` means the file could not be read, which callers must treat
    /// as an error rather than as empty content.
    pub fn read_file_contents(&self, filename: &str) -> Option<Vec<u8>> {
        let path = self.resolve(filename).ok()?;
        fs::read(path).ok()
    }

    /// Append `text` to a managed file and record it for undo.
    ///
    /// Returns the number of bytes written.  Empty or absent text is
    /// rejected before the file is touched.  A failed write is not rolled
    /// back and pushes nothing onto the undo stack.
    pub fn append_to_file(&mut self, filename: &str, text: Option<&str>) -> Result<u64> {
        let text = match text {
            Some(t) if !t.is_empty() => t,
            _ => return Err(FileVaultError::NothingToAppend),
        };
        let path = self.resolve(filename)?;

        let write_err = |source| FileVaultError::OpenOrWriteError {
            filename: filename.to_string(),
            source,
        };
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .map_err(write_err)?;
        file.write_all(text.as_bytes()).map_err(write_err)?;

        let written = text.len() as u64;
        // A full stack leaves this append committed but not undoable.
        let _ = self.undo.push(filename, written);
        Ok(written)
    }

    /// Undo the most recent append by truncating its bytes off the file.
    ///
    /// The undo entry is consumed before the file is touched, so a failed
    /// truncation cannot be retried.
    pub fn undo_last_append(&mut self) -> Result<String> {
        let UndoEntry {
            filename,
            appended_len,
        } = self.undo.pop().ok_or(FileVaultError::NothingToUndo)?;

        match self.truncate_tail(&filename, appended_len) {
            Ok(()) => Ok(filename),
            Err(source) => Err(FileVaultError::UndoError { filename, source }),
        }
    }

    fn truncate_tail(&self, filename: &str, len: u64) -> std::io::Result<()> {
        let path = self
            .resolve(filename)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

        let file = OpenOptions::new().write(true).open(&path)?;
        let current = file.metadata()?.len();
        file.set_len(current.saturating_sub(len))?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Up to `max_count` recently accessed files, most recent first.
    pub fn list_recent(&self, max_count: usize) -> Vec<&str> {
        self.recent.list_recent(max_count)
    }

    /// Number of appends that can currently be undone.
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn entry_count(&self) -> usize {
        self.store.len()
    }

    pub fn recent_capacity(&self) -> usize {
        self.recent.capacity()
    }

    pub fn data_dir(&self) -> &Path {
        self.store.data_dir()
    }

    fn resolve(&self, filename: &str) -> Result<PathBuf> {
        let name = Filename::parse(filename)?;
        Ok(self.store.file_path(&name))
    }
}
