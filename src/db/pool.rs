//! SQLite connection wrapper (lightweight for CLI usage).

use crate::errors::AppResult;
use rusqlite::Connection;
use std::fs;
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open (creating parent directories if needed) without touching the schema.
    pub fn new(path: &str) -> AppResult<Self> {
        let p = Path::new(path);
        if let Some(parent) = p.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(p)?;
        Ok(Self { conn })
    }

    /// In-memory database, used by tests.
    pub fn in_memory() -> AppResult<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Helper to execute a closure with a connection reference.
    pub fn with_conn<F, T>(&self, func: F) -> AppResult<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        Ok(func(&self.conn)?)
    }
}
