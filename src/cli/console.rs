//! Console I/O used by the interactive menu.
//!
//! The menu only talks to the `Console` trait.  `TerminalConsole` backs
//! it with `dialoguer` prompts when stdin is a terminal and with plain
//! line reads when input is piped, so sessions can be scripted.

use std::io::{self, BufRead, IsTerminal, Write};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::errors::{FileVaultError, Result};

/// Line that ends a block of appended text.
pub const END_OF_TEXT: &str = ".";

pub trait Console {
    fn show_menu(&mut self);

    /// Read an integer, re-prompting until one is entered.
    fn read_number(&mut self, prompt: &str) -> Result<i64>;

    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Read a password without echoing it.
    fn read_password(&mut self, prompt: &str) -> Result<Zeroizing<String>>;

    /// Read lines until `END_OF_TEXT`.  `None` when nothing was entered.
    fn read_text_block(&mut self) -> Result<Option<String>>;

    fn success(&mut self, msg: &str);
    fn info(&mut self, msg: &str);
    fn error(&mut self, msg: &str);

    fn show_recent(&mut self, names: &[&str]);
    fn show_contents(&mut self, filename: &str, contents: Option<&[u8]>);
}

/// Console bound to the process's stdin/stdout.
pub struct TerminalConsole {
    interactive: bool,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self {
            interactive: io::stdin().is_terminal(),
        }
    }

    fn prompt_err(e: dialoguer::Error) -> FileVaultError {
        FileVaultError::CommandFailed(format!("input prompt: {e}"))
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

/// Read one line from stdin without its line ending.  `None` on EOF.
fn next_line() -> Result<Option<String>> {
    let mut buf = String::new();
    if io::stdin().lock().read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    let trimmed = buf.trim_end_matches(['\r', '\n']).len();
    buf.truncate(trimmed);
    Ok(Some(buf))
}

/// Print a prompt and read the answer; EOF ends the session.
fn ask(prompt: &str) -> Result<String> {
    print!("{prompt}: ");
    io::stdout().flush()?;
    next_line()?.ok_or(FileVaultError::UserCancelled)
}

/// Collect lines until `END_OF_TEXT` or EOF, keeping their newlines.
pub fn collect_text_block<I>(lines: I) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    let mut text = String::new();
    for line in lines {
        if line == END_OF_TEXT {
            break;
        }
        text.push_str(&line);
        text.push('\n');
    }
    (!text.is_empty()).then_some(text)
}

impl Console for TerminalConsole {
    fn show_menu(&mut self) {
        output::print_menu();
    }

    fn read_number(&mut self, prompt: &str) -> Result<i64> {
        if self.interactive {
            return dialoguer::Input::<i64>::new()
                .with_prompt(prompt)
                .interact_text()
                .map_err(Self::prompt_err);
        }
        loop {
            let answer = ask(prompt)?;
            match answer.trim().parse() {
                Ok(n) => return Ok(n),
                Err(_) => output::warning("Invalid number. Try again."),
            }
        }
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        if self.interactive {
            return dialoguer::Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .map_err(Self::prompt_err);
        }
        ask(prompt)
    }

    fn read_password(&mut self, prompt: &str) -> Result<Zeroizing<String>> {
        if self.interactive {
            let pw = dialoguer::Password::new()
                .with_prompt(prompt)
                .allow_empty_password(true)
                .interact()
                .map_err(Self::prompt_err)?;
            return Ok(Zeroizing::new(pw));
        }
        ask(prompt).map(Zeroizing::new)
    }

    fn read_text_block(&mut self) -> Result<Option<String>> {
        println!("Enter text to append (a single \"{END_OF_TEXT}\" on its own line to finish):");
        let mut lines = Vec::new();
        while let Some(line) = next_line()? {
            let done = line == END_OF_TEXT;
            lines.push(line);
            if done {
                break;
            }
        }
        Ok(collect_text_block(lines))
    }

    fn success(&mut self, msg: &str) {
        output::success(msg);
    }

    fn info(&mut self, msg: &str) {
        output::info(msg);
    }

    fn error(&mut self, msg: &str) {
        output::error(msg);
    }

    fn show_recent(&mut self, names: &[&str]) {
        output::print_recent_table(names);
    }

    fn show_contents(&mut self, filename: &str, contents: Option<&[u8]>) {
        output::print_contents(filename, contents);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn text_block_stops_at_dot_line() {
        let text = collect_text_block(lines(&["first", "second", ".", "ignored"]));
        assert_eq!(text.as_deref(), Some("first\nsecond\n"));
    }

    #[test]
    fn text_block_keeps_blank_lines() {
        let text = collect_text_block(lines(&["a", "", "b", "."]));
        assert_eq!(text.as_deref(), Some("a\n\nb\n"));
    }

    #[test]
    fn text_block_accepts_eof_as_end() {
        let text = collect_text_block(lines(&["only"]));
        assert_eq!(text.as_deref(), Some("only\n"));
    }

    #[test]
    fn empty_block_is_none() {
        assert!(collect_text_block(lines(&["."])).is_none());
        assert!(collect_text_block(Vec::new()).is_none());
    }

    #[test]
    fn dot_inside_a_line_does_not_end_block() {
        let text = collect_text_block(lines(&["v1.2", " .", "."]));
        assert_eq!(text.as_deref(), Some("v1.2\n .\n"));
    }
}
