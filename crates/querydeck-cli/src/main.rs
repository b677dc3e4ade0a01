//! `querydeck` command line.
//!
//! Without a subcommand the interactive shell starts. Logging goes to
//! stderr; `QUERYDECK_LOG` takes an `EnvFilter` directive and `-v` raises
//! the level past it.

mod args;
mod history;
mod oneshot;
mod render;
mod shell;

use args::{Cli, Command};
use clap::Parser;
use querydeck::{Error, HttpCatalog, core::session::Session};
use shell::Repl;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "QUERYDECK_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Error> {
    let config = cli.connection.resolve()?;
    let catalog = HttpCatalog::new(&config)?;
    let session = Session::new(&catalog, config.database.clone());
    info!(base_url = %catalog.base_url(), database = %config.database, "catalog ready");

    match cli.command.unwrap_or(Command::Shell) {
        Command::Tables => oneshot::tables(&session),
        Command::Columns { table, joinable } => oneshot::columns(&session, &table, joinable),
        Command::Sql { text } => oneshot::sql(&session, &text),
        Command::Select(args) => oneshot::select(&session, &args),
        Command::Join(args) => oneshot::join(&session, &args),
        Command::BulkInsert => oneshot::bulk_insert(&session),
        Command::Shell => {
            println!("Connected to: {} (database {})", catalog.base_url(), config.database);
            match Repl::new(session).and_then(|mut repl| repl.run()) {
                Ok(()) => Ok(ExitCode::SUCCESS),
                Err(err) => {
                    eprintln!("error: line editor: {err}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
