//! `filevault view` — print the contents of a protected file.

use crate::audit::log_audit;
use crate::cli::output;
use crate::cli::{ensure_registered, open_service, prompt_password, Cli};
use crate::errors::{FileVaultError, Result};

/// Execute the `view` command.
pub fn execute(cli: &Cli, file: &str) -> Result<()> {
    let mut service = open_service(cli)?;
    ensure_registered(&service, file)?;

    let password = prompt_password("Enter password")?;
    if let Err(e) = service.access_file(file, &password) {
        log_audit(service.data_dir(), "access-denied", Some(file), None);
        return Err(e);
    }
    log_audit(service.data_dir(), "access", Some(file), None);

    let contents = service.read_file_contents(file).ok_or_else(|| {
        FileVaultError::CommandFailed(format!("could not read '{file}'"))
    })?;
    output::print_contents(file, Some(contents.as_slice()));

    Ok(())
}
