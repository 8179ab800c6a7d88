//! workhours library root.
//! Exposes the CLI parser, the high-level run() function, and the
//! tracker core (entries, half-month cycle statistics, chart aggregates).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use crate::core::Tracker;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => return cli::commands::init::handle(cli),
        Commands::Config { .. } => return cli::commands::config::handle(&cli.command, cfg),
        _ => {}
    }

    // Loaded once here; each mutating operation saves it back.
    let mut tracker = Tracker::open(&cfg.database);
    if !tracker.is_persistent() {
        ui::messages::warning(format!(
            "Database {} unavailable: changes will not be saved.",
            cfg.database
        ));
    }

    match &cli.command {
        Commands::Register { .. }
        | Commands::Login { .. }
        | Commands::Logout
        | Commands::Whoami => cli::commands::auth::handle(&cli.command, &mut tracker),
        Commands::Settings { .. } => {
            cli::commands::settings::handle(&cli.command, cfg, &mut tracker)
        }
        Commands::Add { .. } => cli::commands::add::handle(&cli.command, &mut tracker),
        Commands::Del { .. } => cli::commands::del::handle(&cli.command, &mut tracker),
        Commands::List => cli::commands::list::handle(&tracker),
        Commands::Cycle { .. } => cli::commands::cycle::handle(&cli.command, cfg, &tracker),
        Commands::Chart => cli::commands::chart::handle(cfg, &tracker),
        Commands::Init | Commands::Config { .. } => Ok(()),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load();
    utils::logging::enable_logging(&cfg.log_level);

    if let Some(custom_db) = &cli.db {
        cfg.database = Config::resolve_database(custom_db)
            .to_string_lossy()
            .to_string();
    }

    dispatch(&cli, &cfg)
}
