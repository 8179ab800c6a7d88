use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::migrate::applied_versions;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database with all pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.clone(), cli.test)?;

    println!("⚙️  Initializing workhours…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database    : {}", cfg.database);

    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;

    for version in applied_versions(&pool.conn)? {
        info(format!("migration {}", version));
    }

    success(format!("Database initialized at {}", cfg.database));
    Ok(())
}
