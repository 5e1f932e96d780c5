mod cli;
mod commands;

use clap::Parser;

use cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::List => commands::list(),
        Command::Guess { file, mimetype } => {
            commands::guess(&file, mimetype.as_deref());
        }
        Command::Highlight {
            file,
            language,
            formatter,
            theme,
            line_numbers,
        } => {
            commands::highlight(&file, &language, formatter, &theme, line_numbers);
        }
        Command::Tokens {
            file,
            language,
            json,
            trace,
        } => {
            commands::tokens(&file, &language, json, trace);
        }
    }
}
