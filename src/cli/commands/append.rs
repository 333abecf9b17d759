//! `filevault append` — append text to a protected file.

use std::io::{self, IsTerminal, Read};

use crate::audit::log_audit;
use crate::cli::console::{Console, TerminalConsole};
use crate::cli::output;
use crate::cli::{ensure_registered, open_service, prompt_password, Cli};
use crate::errors::Result;

/// Execute the `append` command.
pub fn execute(cli: &Cli, file: &str, text: Option<&str>) -> Result<()> {
    let mut service = open_service(cli)?;
    ensure_registered(&service, file)?;

    let password = prompt_password("Enter password")?;
    if let Err(e) = service.access_file(file, &password) {
        log_audit(service.data_dir(), "access-denied", Some(file), None);
        return Err(e);
    }

    // Determine the text from one of three sources.
    let body = if let Some(t) = text {
        // Source 1: Inline text on the command line.
        Some(t.to_string())
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input, appended verbatim.
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Some(buf)
    } else {
        // Source 3: Interactive block ending with a "." line.
        TerminalConsole::new().read_text_block()?
    };

    let written = service.append_to_file(file, body.as_deref())?;

    let details = format!("{written} bytes");
    log_audit(service.data_dir(), "append", Some(file), Some(&details));
    output::success(&format!("Appended {written} bytes to '{file}'"));

    Ok(())
}
