use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{FileVaultError, Result};
use crate::history::{RECENT_CAPACITY, UNDO_CAPACITY};
use crate::vault::MAX_ENTRIES;

/// Name of the config file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = ".filevault.toml";

/// Project-level configuration, loaded from `.filevault.toml`.
///
/// Every field has a sensible default so FileVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Registry file name (relative to the project directory).
    #[serde(default = "default_registry_file")]
    pub registry_file: String,

    /// Directory (relative to the project directory) holding managed files.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Maximum number of registered files.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// How many recently accessed files to remember.
    #[serde(default = "default_recent_capacity")]
    pub recent_capacity: usize,

    /// How many appends can be undone.
    #[serde(default = "default_undo_capacity")]
    pub undo_capacity: usize,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_registry_file() -> String {
    "vault.txt".to_string()
}

fn default_data_dir() -> String {
    ".".to_string()
}

fn default_max_entries() -> usize {
    MAX_ENTRIES
}

fn default_recent_capacity() -> usize {
    RECENT_CAPACITY
}

fn default_undo_capacity() -> usize {
    UNDO_CAPACITY
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            registry_file: default_registry_file(),
            data_dir: default_data_dir(),
            max_entries: default_max_entries(),
            recent_capacity: default_recent_capacity(),
            undo_capacity: default_undo_capacity(),
        }
    }
}

impl Settings {
    /// Load settings from `<project_dir>/.filevault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            FileVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject capacities the vault cannot work with.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("max_entries", self.max_entries),
            ("recent_capacity", self.recent_capacity),
            ("undo_capacity", self.undo_capacity),
        ] {
            if value == 0 {
                return Err(FileVaultError::ConfigError(format!(
                    "{name} must be at least 1"
                )));
            }
        }
        if self.registry_file.trim().is_empty() {
            return Err(FileVaultError::ConfigError(
                "registry_file cannot be empty".into(),
            ));
        }
        Ok(())
    }

    /// Full path to the registry file.
    ///
    /// Example: `project_dir/vault.txt`
    pub fn registry_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.registry_file)
    }

    /// Full path to the directory holding managed files.
    pub fn data_path(&self, project_dir: &Path) -> PathBuf {
        if self.data_dir == "." {
            project_dir.to_path_buf()
        } else {
            project_dir.join(&self.data_dir)
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
