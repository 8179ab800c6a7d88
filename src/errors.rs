//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use chrono::NaiveTime;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Storage-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Stored data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Input validation
    // ---------------------------
    #[error("{0}")]
    Validation(String),

    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid time format: {0} (expected HH:MM)")]
    InvalidTime(String),

    #[error("Clock Out time must be after Clock In time ({clock_in} → {clock_out})")]
    InvalidRange {
        clock_in: NaiveTime,
        clock_out: NaiveTime,
    },

    // ---------------------------
    // Authentication
    // ---------------------------
    #[error("Username already exists: {0}")]
    DuplicateUser(String),

    #[error("Invalid username or password")]
    Auth,

    #[error("Not logged in: run `workhours login <USER>` or `workhours register <USER>` first")]
    NotLoggedIn,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;
