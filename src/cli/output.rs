//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command and the menu.

use comfy_table::{ContentArrangement, Table};
use console::style;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print the main menu with its fixed numbering.
pub fn print_menu() {
    println!();
    println!("{}", style("--- FILE VAULT MENU ---").bold());
    println!("1. Add New File");
    println!("2. Access File");
    println!("3. Change Password");
    println!("4. Show Recent Files");
    println!("5. Undo Last Append");
    println!("6. Exit");
}

/// Print recently accessed files as a numbered table (1 = most recent).
pub fn print_recent_table(names: &[&str]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "File"]);

    for (i, name) in names.iter().enumerate() {
        table.add_row(vec![(i + 1).to_string(), (*name).to_string()]);
    }

    println!("Recent files (1 = most recent):");
    println!("{table}");
}

/// Print a file's contents, or a marker when it could not be read.
pub fn print_contents(filename: &str, contents: Option<&[u8]>) {
    println!("{}", style(format!("Contents of {filename}:")).bold());
    match contents {
        Some([]) => println!("{}", style("(empty file)").dim()),
        Some(bytes) => {
            let text = String::from_utf8_lossy(bytes);
            print!("{text}");
            if !text.ends_with('\n') {
                println!();
            }
        }
        None => error("(no content or error reading)"),
    }
}
