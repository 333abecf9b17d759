//! `filevault add` — register a new file and protect it with a password.

use crate::audit::log_audit;
use crate::cli::output;
use crate::cli::{open_service, prompt_new_password, Cli, PASSWORD_ENV};
use crate::errors::Result;

/// Execute the `add` command.
pub fn execute(cli: &Cli, file: &str) -> Result<()> {
    let mut service = open_service(cli)?;

    let password = prompt_new_password(PASSWORD_ENV, "Set a password for this file")?;
    service.add_file(file, &password)?;

    log_audit(service.data_dir(), "add", Some(file), None);
    output::success(&format!(
        "File '{}' added and protected ({} total)",
        file,
        service.entry_count()
    ));
    output::tip(&format!("Run `filevault append {file}` to write to it."));

    Ok(())
}
