//! todomd CLI entry point.

use clap::Parser;
use std::process::ExitCode;
use tmd::cli::commands::{self, todo::ListFilter, Workspace};
use tmd::cli::{Cli, Commands};
use tmd::error::Error;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.silent {
        tmd::SILENT.store(true, std::sync::atomic::Ordering::Relaxed);
    }
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Set up tracing based on verbosity
    init_tracing(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                eprintln!("{}", e.to_structured_json());
            } else if !cli.quiet {
                if let Some(hint) = e.hint() {
                    eprintln!("Error: {e}\n  Hint: {hint}");
                } else {
                    eprintln!("Error: {e}");
                }
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    // Honor RUST_LOG if set, otherwise use verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug,hyper=info,reqwest=info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli) -> Result<(), Error> {
    let json = cli.json;

    // Commands that need no data directory
    match &cli.command {
        Commands::Version => return commands::version::execute(json),
        Commands::Completions { shell } => return commands::completions::execute(*shell),
        _ => {}
    }

    let workspace = Workspace::resolve(cli.home.as_deref(), cli.file.as_deref())?;

    match &cli.command {
        Commands::List { pending, done } => {
            commands::todo::list(&workspace, ListFilter::from_flags(*pending, *done), json)
        }
        Commands::Add(args) => commands::todo::add(&workspace, args, cli.offline, json),
        Commands::Toggle { id } => commands::todo::toggle(&workspace, id, cli.offline, json),
        Commands::Edit(args) => commands::todo::edit(&workspace, args, cli.offline, json),
        Commands::Delete { id } => commands::todo::delete(&workspace, id, cli.offline, json),
        Commands::Sync => commands::sync::execute(&workspace, json),
        Commands::Status => commands::status::execute(&workspace, json),
        Commands::Upcoming => commands::upcoming::execute(&workspace, json),
        Commands::Config { command } => commands::config::execute(command, &workspace, json),
        Commands::Version | Commands::Completions { .. } => Ok(()),
    }
}
