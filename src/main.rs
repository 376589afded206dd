use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod delivery;
mod error;
mod form;
mod model;
mod tui;

use cli::args::{Cli, Commands};
use cli::commands;
use config::types::Verbosity;
use error::HookError;

fn main() {
    let cli = Cli::parse();

    // Convert CLI flags to verbosity level
    let verbosity = Verbosity::from((cli.quiet, cli.verbose));

    // Set up tracing with verbosity-based filter
    // RUST_LOG env var overrides CLI flags
    let filter = verbosity.as_tracing_filter();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr) // Keep stdout clean for output
        .init();

    tracing::debug!("Verbosity level: {:?}", verbosity);

    if let Err(err) = run(cli) {
        display_error(&err);
        std::process::exit(1);
    }
}

/// Execute the dispatched command.
fn run(cli: Cli) -> Result<(), HookError> {
    match cli.command {
        Commands::List => commands::list(),
        Commands::Show(args) => commands::show(&args.name),
        Commands::Add(args) => commands::add(args),
        Commands::Rm(args) => commands::rm(&args.name),
        Commands::Enable(args) => commands::set_enabled(&args.name, true),
        Commands::Disable(args) => commands::set_enabled(&args.name, false),
        Commands::Subscribe(args) => commands::subscribe(args),
        Commands::Fire(args) => commands::fire(args),
        Commands::Log(args) => commands::log(args),
        Commands::Ui => commands::ui(),
        Commands::Completions(args) => commands::completions(args.shell),
    }
}

/// Display a HookError with optional suggestion hint to stderr.
fn display_error(err: &HookError) {
    eprintln!("error: {}", err);
    if let Some(suggestion) = err.suggestion() {
        eprintln!("  hint: {}", suggestion);
    }
}
