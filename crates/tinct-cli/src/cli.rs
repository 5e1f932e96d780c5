use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Html,
    Null,
}

#[derive(Parser)]
#[command(name = "tinct", bin_name = "tinct")]
#[command(about = "Syntax highlighting driven by regex grammars")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the available grammars
    List,

    /// Guess the grammar for a file and print its tag
    Guess {
        /// Input file (use - for stdin)
        file: PathBuf,

        /// Mimetype hint
        #[arg(long, value_name = "TYPE")]
        mimetype: Option<String>,
    },

    /// Highlight a file
    Highlight {
        /// Input file (use - for stdin)
        file: PathBuf,

        /// Grammar tag or alias (guessed when omitted)
        #[arg(short = 'l', long, value_name = "LANG")]
        language: Option<String>,

        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Terminal)]
        formatter: OutputFormat,

        /// Theme for terminal output
        #[arg(short = 't', long, default_value = "aurora")]
        theme: String,

        /// Number lines (HTML output)
        #[arg(long)]
        line_numbers: bool,
    },

    /// Dump the raw token stream
    Tokens {
        /// Input file (use - for stdin)
        file: PathBuf,

        /// Grammar tag or alias (guessed when omitted)
        #[arg(short = 'l', long, value_name = "LANG")]
        language: Option<String>,

        /// Emit JSON instead of one line per token
        #[arg(long)]
        json: bool,

        /// Trace engine steps to stderr
        #[arg(long)]
        trace: bool,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::Cli;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
