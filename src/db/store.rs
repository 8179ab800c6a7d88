//! String-keyed key/value storage with JSON values.
//!
//! Two scopes are backed by SQLite: `local_storage` (durable) and
//! `session_storage` (scoped to the invoking terminal session).

use crate::db::pool::DbPool;
use crate::errors::AppResult;
use rusqlite::{OptionalExtension, params};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use sysinfo::{Pid, ProcessesToUpdate, System, get_current_pid};

/// Key holding the JSON map of every registered user.
pub const USERS_KEY: &str = "workHoursUsers";
/// Durable key holding the remembered username.
pub const REMEMBER_KEY: &str = "rememberUser";
/// Session-scoped key holding the current username.
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Environment variable naming the session; defaults to the parent process id.
pub const SESSION_ENV: &str = "WORKHOURS_SESSION";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
    fn remove(&self, key: &str) -> AppResult<()>;
}

/// Durable scope: survives restarts.
pub struct SqliteStore {
    pool: Rc<DbPool>,
}

impl SqliteStore {
    pub fn new(pool: Rc<DbPool>) -> Self {
        Self { pool }
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.pool.with_conn(|conn| {
            conn.query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()
        })
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.pool.with_conn(|conn| {
            conn.execute(
                "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map(|_| ())
        })
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.pool.with_conn(|conn| {
            conn.execute("DELETE FROM local_storage WHERE key = ?1", [key])
                .map(|_| ())
        })
    }
}

/// Who the session belongs to. `token` pins the id to one lifetime of the
/// owning process, so a reused pid does not inherit an old login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub id: String,
    pub token: String,
}

impl SessionIdentity {
    pub fn new(id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            token: token.into(),
        }
    }
}

/// Session scope: rows are partitioned by session id and token.
pub struct SessionStore {
    pool: Rc<DbPool>,
    identity: SessionIdentity,
}

impl SessionStore {
    pub fn new(pool: Rc<DbPool>, identity: SessionIdentity) -> Self {
        Self { pool, identity }
    }

    pub fn session_id(&self) -> &str {
        &self.identity.id
    }

    /// Drop rows left under this session id by an earlier process.
    pub fn purge_stale(&self) -> AppResult<usize> {
        self.pool.with_conn(|conn| {
            conn.execute(
                "DELETE FROM session_storage WHERE session_id = ?1 AND token <> ?2",
                params![self.identity.id, self.identity.token],
            )
        })
    }

    /// Drop rows of process-bound sessions whose process is gone.
    /// `is_live(session_id, token)` decides; explicit sessions are kept.
    pub fn prune_dead<F>(&self, is_live: F) -> AppResult<usize>
    where
        F: Fn(&str, &str) -> bool,
    {
        let sessions: Vec<(String, String)> = self.pool.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT DISTINCT session_id, token FROM session_storage
                 WHERE session_id LIKE 'ppid-%'",
            )?;
            let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
            rows.collect()
        })?;

        let mut removed = 0;
        for (id, token) in sessions {
            if id == self.identity.id || is_live(&id, &token) {
                continue;
            }
            removed += self.pool.with_conn(|conn| {
                conn.execute(
                    "DELETE FROM session_storage WHERE session_id = ?1 AND token = ?2",
                    params![id, token],
                )
            })?;
        }
        Ok(removed)
    }
}

impl KeyValueStore for SessionStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.pool.with_conn(|conn| {
            conn.query_row(
                "SELECT value FROM session_storage
                 WHERE session_id = ?1 AND token = ?2 AND key = ?3",
                params![self.identity.id, self.identity.token, key],
                |row| row.get(0),
            )
            .optional()
        })
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.pool.with_conn(|conn| {
            conn.execute(
                "INSERT INTO session_storage (session_id, key, value, token) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(session_id, key) DO UPDATE
                 SET value = excluded.value, token = excluded.token",
                params![self.identity.id, key, value, self.identity.token],
            )
            .map(|_| ())
        })
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.pool.with_conn(|conn| {
            conn.execute(
                "DELETE FROM session_storage WHERE session_id = ?1 AND key = ?2",
                params![self.identity.id, key],
            )
            .map(|_| ())
        })
    }
}

/// Process-local store, used by tests and when the database is unavailable.
#[derive(Default)]
pub struct MemoryStore {
    data: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.data.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.data
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.data.borrow_mut().remove(key);
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        (**self).remove(key)
    }
}

/// Start time of process `pid`, used as the token of its session.
pub fn process_token(pid: u32) -> Option<String> {
    let pid = Pid::from_u32(pid);
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
    system.process(pid).map(|p| p.start_time().to_string())
}

/// Liveness check for `ppid-<pid>` sessions: same pid, same start time.
pub fn is_live_process_session(session_id: &str, token: &str) -> bool {
    session_id
        .strip_prefix("ppid-")
        .and_then(|pid| pid.parse::<u32>().ok())
        .and_then(process_token)
        .is_some_and(|current| current == token)
}

/// Identify the current terminal session: `WORKHOURS_SESSION` if set,
/// otherwise the parent process (the invoking shell) and its start time.
pub fn current_session() -> SessionIdentity {
    if let Ok(id) = std::env::var(SESSION_ENV)
        && !id.trim().is_empty()
    {
        return SessionIdentity::new(id.trim(), "");
    }

    let parent = get_current_pid().ok().and_then(|pid| {
        let mut system = System::new();
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        system.process(pid).and_then(|p| p.parent())
    });

    match parent {
        Some(ppid) => {
            let ppid = ppid.as_u32();
            SessionIdentity::new(
                format!("ppid-{}", ppid),
                process_token(ppid).unwrap_or_default(),
            )
        }
        None => SessionIdentity::new("default", ""),
    }
}
