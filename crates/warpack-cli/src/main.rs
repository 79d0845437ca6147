//! Warpack CLI - packages web applications as WAR archives.

mod cli;
mod commands;
mod error;
mod output;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use cli::Commands;
use output::OutputFormatter;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use warpack_core::ArchiveKind;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let formatter = output::create_formatter(&cli);

    match run(&cli, &*formatter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            formatter.format_error(cli.command.name(), &err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    match &cli.command {
        Commands::War(args) => {
            commands::war::execute(&cli.project, args, ArchiveKind::War, formatter)
        }
        Commands::Uberwar(args) => {
            commands::war::execute(&cli.project, args, ArchiveKind::Uberwar, formatter)
        }
        Commands::WebXml => commands::web_xml::execute(&cli.project, formatter),
        Commands::Completion { shell } => {
            commands::completion::execute(*shell);
            Ok(())
        }
    }
}

/// Logs go to stderr. `RUST_LOG` wins over the verbosity flags.
fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
