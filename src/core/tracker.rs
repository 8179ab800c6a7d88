//! Application state: every registered user plus the active session.
//!
//! State is loaded once from the key/value stores at startup and written
//! back explicitly after each change.

use crate::core::calculator::chart::{self, PeriodTotal};
use crate::core::calculator::cycle::{self, CycleStats};
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::store::{
    CURRENT_USER_KEY, KeyValueStore, MemoryStore, REMEMBER_KEY, SessionIdentity, SessionStore,
    SqliteStore, USERS_KEY, current_session, is_live_process_session,
};
use crate::errors::{AppError, AppResult};
use crate::models::{Session, User};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::{debug, error, warn};

pub type Users = BTreeMap<String, User>;

pub struct Tracker {
    durable: Box<dyn KeyValueStore>,
    transient: Box<dyn KeyValueStore>,
    persistent: bool,
    users: Users,
    session: Option<Session>,
}

impl Tracker {
    /// Open the SQLite-backed stores at `database`. If that fails the
    /// tracker runs on empty in-memory stores.
    pub fn open(database: &str) -> Self {
        Self::open_as(database, current_session())
    }

    /// Like [`Tracker::open`] with an explicit session identity. Session
    /// rows left by earlier owners of the id, or by terminals that no
    /// longer exist, are deleted before the session is restored.
    pub fn open_as(database: &str, identity: SessionIdentity) -> Self {
        match open_pool(database) {
            Ok(pool) => {
                let pool = Rc::new(pool);
                let session = SessionStore::new(pool.clone(), identity);
                debug!(database, session_id = session.session_id(), "storage opened");
                match session.purge_stale() {
                    Ok(0) => {}
                    Ok(n) => debug!(removed = n, "dropped stale session rows"),
                    Err(e) => warn!(error = %e, "failed to drop stale session rows"),
                }
                if let Err(e) = session.prune_dead(is_live_process_session) {
                    warn!(error = %e, "failed to prune dead sessions");
                }
                Self::load(Box::new(SqliteStore::new(pool)), Box::new(session))
            }
            Err(e) => {
                warn!(database, error = %e, "storage unavailable, using in-memory state");
                Self::in_memory()
            }
        }
    }

    /// Empty state on process-local stores; nothing is saved to disk.
    pub fn in_memory() -> Self {
        let mut tracker = Self::load(Box::new(MemoryStore::new()), Box::new(MemoryStore::new()));
        tracker.persistent = false;
        tracker
    }

    /// Read users and the session marker. Unreadable or corrupt data is
    /// logged and replaced by an empty state.
    pub fn load(durable: Box<dyn KeyValueStore>, transient: Box<dyn KeyValueStore>) -> Self {
        let users = load_users(durable.as_ref());
        let session = restore_session(durable.as_ref(), transient.as_ref(), &users);

        Self {
            durable,
            transient,
            persistent: true,
            users,
            session,
        }
    }

    /// Write the users map back to durable storage.
    pub fn save(&self) -> AppResult<()> {
        let raw = serde_json::to_string(&self.users)?;
        self.durable.set(USERS_KEY, &raw)
    }

    /// Save, logging instead of failing: the in-memory state stays valid.
    pub(crate) fn persist(&self) {
        if let Err(e) = self.save() {
            error!(error = %e, "failed to save state");
        }
    }

    /// False when running on the in-memory fallback.
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    pub fn users(&self) -> &Users {
        &self.users
    }

    pub(crate) fn users_mut(&mut self) -> &mut Users {
        &mut self.users
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn username(&self) -> AppResult<&str> {
        self.session
            .as_ref()
            .map(|s| s.username.as_str())
            .ok_or(AppError::NotLoggedIn)
    }

    pub fn current_user(&self) -> AppResult<&User> {
        let name = self.username()?;
        self.users.get(name).ok_or(AppError::NotLoggedIn)
    }

    pub(crate) fn current_user_mut(&mut self) -> AppResult<&mut User> {
        let name = self
            .session
            .as_ref()
            .map(|s| s.username.clone())
            .ok_or(AppError::NotLoggedIn)?;
        self.users.get_mut(&name).ok_or(AppError::NotLoggedIn)
    }

    /// Record the session marker in the scope chosen at login. The marker
    /// of the other scope is dropped so an older login cannot win on restart.
    pub(crate) fn start_session(&mut self, username: &str, remember: bool) {
        let (keep, keep_key, stale, stale_key) = if remember {
            (&self.durable, REMEMBER_KEY, &self.transient, CURRENT_USER_KEY)
        } else {
            (&self.transient, CURRENT_USER_KEY, &self.durable, REMEMBER_KEY)
        };

        if let Err(e) = keep.set(keep_key, username) {
            error!(error = %e, "failed to store session marker");
        }
        if let Err(e) = stale.remove(stale_key) {
            warn!(error = %e, "failed to clear stale session marker");
        }

        self.session = Some(Session {
            username: username.to_string(),
            remember,
        });
    }

    pub(crate) fn end_session(&mut self) {
        if let Err(e) = self.durable.remove(REMEMBER_KEY) {
            warn!(error = %e, "failed to clear remembered user");
        }
        if let Err(e) = self.transient.remove(CURRENT_USER_KEY) {
            warn!(error = %e, "failed to clear session user");
        }
        self.session = None;
    }

    pub fn cycle_stats(&self, today: NaiveDate) -> AppResult<CycleStats> {
        let user = self.current_user()?;
        Ok(cycle::current_cycle_stats(
            &user.entries,
            &user.settings,
            today,
        ))
    }

    pub fn hours_chart(&self) -> AppResult<Vec<PeriodTotal>> {
        Ok(chart::hours_by_period(&self.current_user()?.entries))
    }

    pub fn earnings_chart(&self) -> AppResult<Vec<PeriodTotal>> {
        let user = self.current_user()?;
        Ok(chart::earnings_by_period(
            &user.entries,
            user.settings.hourly_rate,
        ))
    }
}

fn open_pool(database: &str) -> AppResult<DbPool> {
    let pool = DbPool::new(database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

fn load_users(store: &dyn KeyValueStore) -> Users {
    match store.get(USERS_KEY) {
        Ok(Some(raw)) => match serde_json::from_str::<Users>(&raw) {
            Ok(users) => users,
            Err(e) => {
                warn!(error = %e, "error loading saved users, starting empty");
                Users::new()
            }
        },
        Ok(None) => Users::new(),
        Err(e) => {
            warn!(error = %e, "storage read failed, starting empty");
            Users::new()
        }
    }
}

fn read_marker(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(v) => v.filter(|s| !s.is_empty()),
        Err(e) => {
            warn!(key, error = %e, "failed to read session marker");
            None
        }
    }
}

fn restore_session(
    durable: &dyn KeyValueStore,
    transient: &dyn KeyValueStore,
    users: &Users,
) -> Option<Session> {
    let session = match read_marker(durable, REMEMBER_KEY) {
        Some(username) => Session {
            username,
            remember: true,
        },
        None => Session {
            username: read_marker(transient, CURRENT_USER_KEY)?,
            remember: false,
        },
    };

    if users.contains_key(&session.username) {
        Some(session)
    } else {
        debug!(username = %session.username, "session names an unknown user, ignored");
        None
    }
}
