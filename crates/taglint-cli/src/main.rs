//! taglint CLI: policy checks for declarative validation tags.
//!
//! This binary provides the `taglint` command with subcommands for checking
//! type graph documents and listing known tags. See `taglint --help` for usage.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli_args;
mod commands;

use cli_args::{Cli, Commands};

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A second init (tests, embedding) is harmless; keep the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let formatter: Box<dyn taglint_output::OutputFormatter> = if cli.json {
        Box::new(taglint_output::json::JsonFormatter)
    } else {
        Box::new(taglint_output::human::HumanFormatter)
    };

    let exit_code = match cli.command {
        Commands::Check {
            paths,
            enabled_types,
            config,
        } => commands::check::run(&*formatter, cli.verbose, paths, enabled_types, config),
        Commands::Tags { config } => commands::tags::run(&*formatter, config),
        Commands::Completion { shell } => commands::completion::run(&shell),
    };

    std::process::exit(exit_code);
}
