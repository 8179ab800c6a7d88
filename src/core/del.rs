use crate::core::tracker::Tracker;
use crate::errors::AppResult;
use tracing::debug;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Remove the entry with `id`. Returns whether something was removed;
    /// an unknown id is a no-op.
    pub fn apply(tracker: &mut Tracker, id: i64) -> AppResult<bool> {
        let user = tracker.current_user_mut()?;
        let before = user.entries.len();
        user.entries.retain(|e| e.id != id);
        let removed = user.entries.len() != before;

        if removed {
            debug!(id, "entry removed");
            tracker.persist();
        }

        Ok(removed)
    }
}
