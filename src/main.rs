use clap::Parser;
use filevault::cli::commands;
use filevault::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        None | Some(Commands::Menu) => commands::menu::execute(&cli),
        Some(Commands::Add { ref file }) => commands::add::execute(&cli, file),
        Some(Commands::View { ref file }) => commands::view::execute(&cli, file),
        Some(Commands::Append { ref file, ref text }) => {
            commands::append::execute(&cli, file, text.as_deref())
        }
        Some(Commands::Passwd { ref file }) => commands::passwd::execute(&cli, file),
        #[cfg(feature = "audit-log")]
        Some(Commands::Audit {
            last,
            since,
            ref file,
        }) => commands::audit_cmd::execute(&cli, last, since, file.as_deref()),
        Some(Commands::Completions { shell }) => commands::completions::execute(shell),
    };

    if let Err(e) = result {
        filevault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
