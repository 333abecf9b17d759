use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in FileVault.
#[derive(Debug, Error)]
pub enum FileVaultError {
    // --- Registry errors ---
    #[error("Vault is full ({0} entries max)")]
    VaultFull(usize),

    #[error("File '{0}' is already in the vault")]
    AlreadyExists(String),

    #[error("Failed to create file '{filename}': {source}")]
    CreateError {
        filename: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File '{0}' not found in the vault")]
    NotFound(String),

    #[error("Incorrect password")]
    WrongPassword,

    #[error("Registry write to {path} failed: {source} (in-memory change kept)")]
    RegistryWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    // --- File content errors ---
    #[error("Nothing to append")]
    NothingToAppend,

    #[error("Failed to open or write to '{filename}': {source}")]
    OpenOrWriteError {
        filename: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Undo failed for '{filename}': {source} (this append can no longer be undone)")]
    UndoError {
        filename: String,
        #[source]
        source: std::io::Error,
    },

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- Audit errors ---
    #[error("Audit error: {0}")]
    AuditError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

/// Convenience type alias for FileVault results.
pub type Result<T> = std::result::Result<T, FileVaultError>;
