//! `filevault passwd` — change the password protecting a file.

use crate::audit::log_audit;
use crate::cli::output;
use crate::cli::{
    ensure_registered, open_service, prompt_new_password, prompt_password, Cli, NEW_PASSWORD_ENV,
};
use crate::errors::Result;

/// Execute the `passwd` command.
pub fn execute(cli: &Cli, file: &str) -> Result<()> {
    let mut service = open_service(cli)?;
    ensure_registered(&service, file)?;

    let old_password = prompt_password("Enter current password")?;
    if !service.verify_password(file, &old_password)? {
        log_audit(service.data_dir(), "access-denied", Some(file), None);
        return Err(crate::errors::FileVaultError::WrongPassword);
    }

    let new_password = prompt_new_password(NEW_PASSWORD_ENV, "Enter new password")?;
    service.change_password(file, &old_password, &new_password)?;

    log_audit(service.data_dir(), "passwd", Some(file), None);
    output::success(&format!("Password changed for '{file}'"));

    Ok(())
}
