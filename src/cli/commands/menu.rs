//! `filevault menu` — the interactive session (also the default).

use crate::cli::console::TerminalConsole;
use crate::cli::{menu, open_service, Cli};
use crate::errors::Result;

/// Execute the interactive menu.
pub fn execute(cli: &Cli) -> Result<()> {
    let mut service = open_service(cli)?;
    let mut console = TerminalConsole::new();
    menu::run(&mut service, &mut console)
}
