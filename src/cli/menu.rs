//! The interactive numbered menu.
//!
//! Menu numbers are a fixed contract: 1=add, 2=access, 3=change
//! password, 4=show recent, 5=undo, 6=exit.  Recent files are picked by
//! 1-based index with 0 meaning cancel.

use crate::audit::log_audit;
use crate::cli::console::Console;
use crate::errors::{FileVaultError, Result};
use crate::service::VaultService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add = 1,
    Access = 2,
    ChangePassword = 3,
    ShowRecent = 4,
    Undo = 5,
    Exit = 6,
}

impl MenuChoice {
    pub fn from_number(n: i64) -> Option<Self> {
        match n {
            1 => Some(Self::Add),
            2 => Some(Self::Access),
            3 => Some(Self::ChangePassword),
            4 => Some(Self::ShowRecent),
            5 => Some(Self::Undo),
            6 => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Run the menu until the user exits or input ends.
pub fn run<C: Console>(service: &mut VaultService, console: &mut C) -> Result<()> {
    loop {
        console.show_menu();

        let outcome = match console.read_number("Enter your choice") {
            Ok(n) => match MenuChoice::from_number(n) {
                Some(MenuChoice::Exit) => {
                    console.info("Exiting...");
                    return Ok(());
                }
                Some(choice) => dispatch(service, console, choice),
                None => {
                    console.error("Invalid choice!");
                    Ok(())
                }
            },
            Err(e) => Err(e),
        };

        match outcome {
            Ok(()) => {}
            Err(FileVaultError::UserCancelled) => return Ok(()),
            Err(e) => return Err(e),
        }
    }
}

fn dispatch<C: Console>(
    service: &mut VaultService,
    console: &mut C,
    choice: MenuChoice,
) -> Result<()> {
    match choice {
        MenuChoice::Add => add_file(service, console),
        MenuChoice::Access => {
            let filename = console.read_line("Enter filename")?;
            access_file(service, console, &filename)
        }
        MenuChoice::ChangePassword => change_password(service, console),
        MenuChoice::ShowRecent => show_recent(service, console),
        MenuChoice::Undo => {
            undo(service, console);
            Ok(())
        }
        MenuChoice::Exit => Ok(()),
    }
}

fn add_file<C: Console>(service: &mut VaultService, console: &mut C) -> Result<()> {
    let filename = console.read_line("Enter filename")?;
    let password = console.read_password("Set a password for this file")?;

    match service.add_file(&filename, &password) {
        Ok(()) => {
            log_audit(service.data_dir(), "add", Some(&filename), None);
            console.success("File added and protected successfully.");
        }
        Err(FileVaultError::VaultFull(_)) => console.error("Vault is full!"),
        Err(FileVaultError::AlreadyExists(_)) => console.error("File already exists!"),
        Err(e @ FileVaultError::RegistryWriteFailed { .. }) => {
            log_audit(service.data_dir(), "add", Some(&filename), Some("registry not saved"));
            console.error(&e.to_string());
        }
        Err(e @ FileVaultError::InvalidField { .. }) => console.error(&e.to_string()),
        Err(e) => console.error(&format!("Failed to create file. {e}")),
    }
    Ok(())
}

/// Probe, authenticate, then offer view/append on one file.
fn access_file<C: Console>(
    service: &mut VaultService,
    console: &mut C,
    filename: &str,
) -> Result<()> {
    if let Err(FileVaultError::NotFound(_)) = service.verify_password(filename, "") {
        console.error("File not found!");
        return Ok(());
    }

    let password = console.read_password("Enter password")?;
    if let Err(e) = service.access_file(filename, &password) {
        log_audit(service.data_dir(), "access-denied", Some(filename), None);
        match e {
            FileVaultError::WrongPassword => console.error("Incorrect password!"),
            other => console.error(&other.to_string()),
        }
        return Ok(());
    }
    log_audit(service.data_dir(), "access", Some(filename), None);

    console.info("1. View file");
    console.info("2. Append to file");
    match console.read_number("Enter your choice")? {
        1 => {
            let contents = service.read_file_contents(filename);
            console.show_contents(filename, contents.as_deref());
        }
        2 => {
            let text = console.read_text_block()?;
            if text.is_none() {
                console.info("No content to append.");
                return Ok(());
            }
            match service.append_to_file(filename, text.as_deref()) {
                Ok(written) => {
                    let details = format!("{written} bytes");
                    log_audit(service.data_dir(), "append", Some(filename), Some(&details));
                    console.success("Content appended successfully.");
                }
                Err(FileVaultError::NothingToAppend) => console.info("Nothing was appended."),
                Err(e) => console.error(&format!("Failed to open or write to file. {e}")),
            }
        }
        _ => console.error("Invalid choice."),
    }
    Ok(())
}

fn change_password<C: Console>(service: &mut VaultService, console: &mut C) -> Result<()> {
    let filename = console.read_line("Enter filename")?;
    let old_password = console.read_password("Enter current password")?;
    let new_password = console.read_password("Enter new password")?;

    match service.change_password(&filename, &old_password, &new_password) {
        Ok(()) => {
            log_audit(service.data_dir(), "passwd", Some(&filename), None);
            console.success("Password changed successfully.");
        }
        Err(FileVaultError::NotFound(_)) => console.error("File not found!"),
        Err(FileVaultError::WrongPassword) => console.error("Incorrect password!"),
        Err(e) => console.error(&e.to_string()),
    }
    Ok(())
}

fn show_recent<C: Console>(service: &mut VaultService, console: &mut C) -> Result<()> {
    let names: Vec<String> = service
        .list_recent(service.recent_capacity())
        .into_iter()
        .map(str::to_string)
        .collect();

    if names.is_empty() {
        console.info("No recent files.");
        return Ok(());
    }

    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    console.show_recent(&refs);

    let pick = console.read_number("Enter a number to open that file (0 to cancel)")?;
    let index = match usize::try_from(pick) {
        Ok(0) => return Ok(()),
        Ok(i) if i <= names.len() => i,
        _ => {
            console.error("Invalid choice.");
            return Ok(());
        }
    };

    access_file(service, console, &names[index - 1])
}

fn undo<C: Console>(service: &mut VaultService, console: &mut C) {
    match service.undo_last_append() {
        Ok(filename) => {
            log_audit(service.data_dir(), "undo", Some(&filename), None);
            console.success(&format!("Undo complete for file: {filename}"));
        }
        Err(FileVaultError::NothingToUndo) => console.info("Nothing to undo."),
        Err(e) => {
            if let FileVaultError::UndoError { filename, .. } = &e {
                log_audit(service.data_dir(), "undo", Some(filename), Some("failed"));
            }
            console.error(&e.to_string());
        }
    }
}
