//! Local-only registration and login. Passwords are compared as plain
//! strings; there is no lockout or hashing.

use crate::core::tracker::Tracker;
use crate::errors::{AppError, AppResult};
use crate::models::{Session, User};
use tracing::debug;

pub struct AuthLogic;

impl AuthLogic {
    pub fn register<'a>(
        tracker: &'a mut Tracker,
        username: &str,
        password: &str,
        remember: bool,
    ) -> AppResult<&'a User> {
        if username.is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "Please enter both username and password".into(),
            ));
        }

        if tracker.users().contains_key(username) {
            return Err(AppError::DuplicateUser(username.to_string()));
        }

        tracker
            .users_mut()
            .insert(username.to_string(), User::new(password));
        tracker.persist();
        tracker.start_session(username, remember);

        debug!(username, remember, "user registered");
        tracker.current_user()
    }

    pub fn login(
        tracker: &mut Tracker,
        username: &str,
        password: &str,
        remember: bool,
    ) -> AppResult<Session> {
        let matches = tracker
            .users()
            .get(username)
            .is_some_and(|u| u.password == password);

        if !matches {
            return Err(AppError::Auth);
        }

        tracker.start_session(username, remember);
        debug!(username, remember, "user logged in");

        Ok(Session {
            username: username.to_string(),
            remember,
        })
    }

    pub fn logout(tracker: &mut Tracker) {
        tracker.end_session();
    }
}
