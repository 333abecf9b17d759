//! `filevault completions <SHELL>` — print a shell completion script.

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::Cli;
use crate::errors::Result;

/// Execute the `completions` command.
pub fn execute(shell: Shell) -> Result<()> {
    write_script(shell, &mut io::stdout().lock())
}

/// Render the completion script for every `filevault` subcommand into `out`.
fn write_script(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, bin, out);
    out.flush()?;
    Ok(())
}
