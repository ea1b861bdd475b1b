use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "taglint",
    version,
    about = "Policy checks for declarative validation tags"
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as structured JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Debug logging on stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Lint type graph documents
    Check {
        /// Graph documents or directories to walk (default: current directory)
        paths: Vec<PathBuf>,
        /// Enforce tag stability on this type (repeatable)
        #[arg(long = "enabled-type", value_name = "TYPE")]
        enabled_types: Vec<String>,
        /// Directory holding taglint.json (default: current directory)
        #[arg(long, value_name = "DIR")]
        config: Option<PathBuf>,
    },

    /// List known validation tags and their stability levels
    Tags {
        /// Directory holding taglint.json (default: current directory)
        #[arg(long, value_name = "DIR")]
        config: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for (bash, zsh, fish, elvish, powershell)
        shell: String,
    },
}

#[cfg(test)]
#[path = "cli_args_tests.rs"]
mod tests;
