//! CLI module — Clap argument parser, console I/O, menu, and commands.

pub mod commands;
pub mod console;
pub mod menu;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{FileVaultError, Result};
use crate::service::VaultService;

/// Env var holding the password for non-interactive use.
pub const PASSWORD_ENV: &str = "FILEVAULT_PASSWORD";

/// Env var holding the replacement password for `passwd`.
pub const NEW_PASSWORD_ENV: &str = "FILEVAULT_NEW_PASSWORD";

/// FileVault CLI: password-protected text files with undo.
#[derive(Parser)]
#[command(
    name = "filevault",
    about = "Password-protected text file vault",
    version
)]
pub struct Cli {
    /// Subcommand to run (default: interactive menu)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Project directory holding the registry and files (default: current dir)
    #[arg(short = 'C', long, global = true)]
    pub dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Run the interactive menu (default)
    Menu,

    /// Register a new file and protect it with a password
    Add {
        /// File name (no spaces, at most 99 bytes)
        file: String,
    },

    /// Print a file's contents
    View {
        /// File name
        file: String,
    },

    /// Append text to a file
    Append {
        /// File name
        file: String,
        /// Text to append (omit to read stdin or prompt)
        text: Option<String>,
    },

    /// Change a file's password
    Passwd {
        /// File name
        file: String,
    },

    /// View the audit log of vault operations
    #[cfg(feature = "audit-log")]
    Audit {
        /// Number of entries to show
        #[arg(long, default_value = "50")]
        last: usize,
        /// Only entries newer than this age (e.g. 7d, 24h, 30m)
        #[arg(long, value_parser = commands::audit_cmd::parse_since)]
        since: Option<chrono::DateTime<chrono::Utc>>,
        /// Only entries about this file
        #[arg(long)]
        file: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the project directory from `--dir` or the current directory.
pub fn project_dir(cli: &Cli) -> Result<PathBuf> {
    match &cli.dir {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => Ok(std::env::current_dir()?),
    }
}

/// Load settings and the registry for the selected project.
///
/// Creates the data directory if the config points somewhere new.
pub fn open_service(cli: &Cli) -> Result<VaultService> {
    let dir = project_dir(cli)?;
    let settings = Settings::load(&dir)?;

    let data_dir = settings.data_path(&dir);
    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)?;
    }

    Ok(VaultService::init(&settings, &dir))
}

/// Get a file password, trying in order:
/// 1. `FILEVAULT_PASSWORD` env var (scripts/CI)
/// 2. Interactive prompt with echo suppressed
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password(prompt: &str) -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env(PASSWORD_ENV) {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| FileVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password with confirmation.
///
/// `env_var` lets scripted runs supply the value instead.
pub fn prompt_new_password(env_var: &str, prompt: &str) -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env(env_var) {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt(prompt)
        .with_confirmation("Confirm password", "Passwords do not match, try again")
        .interact()
        .map_err(|e| FileVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

fn password_from_env(var: &str) -> Option<Zeroizing<String>> {
    match std::env::var(var) {
        Ok(pw) if !pw.is_empty() => Some(Zeroizing::new(pw)),
        _ => None,
    }
}

/// Existence check: fail with `NotFound` before any password is asked for.
pub fn ensure_registered(service: &VaultService, file: &str) -> Result<()> {
    service.verify_password(file, "").map(|_| ())
}
