use crate::core::tracker::Tracker;
use crate::errors::{AppError, AppResult};
use crate::models::{Settings, SettingsUpdate};

fn check_non_negative(name: &str, value: Option<f64>) -> AppResult<()> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(AppError::Validation(format!(
            "{} must be a non-negative number (got {})",
            name, v
        ))),
        _ => Ok(()),
    }
}

/// Apply `update` to `settings`. Everything is validated before anything
/// changes; an explicit target is applied after the recomputation.
pub fn apply_update(settings: &mut Settings, update: &SettingsUpdate) -> AppResult<()> {
    check_non_negative("Hourly rate", update.hourly_rate)?;
    check_non_negative("Daily hours", update.daily_hours)?;
    check_non_negative("Target hours", update.target_hours)?;

    if let Some(rate) = update.hourly_rate {
        settings.hourly_rate = rate;
    }
    if let Some(h) = update.daily_hours {
        settings.set_daily_hours(h);
    }
    if let Some(days) = update.working_days {
        settings.set_working_days(days);
    }
    if let Some(target) = update.target_hours {
        settings.target_hours_per_cycle = target;
    }

    Ok(())
}

pub struct SettingsLogic;

impl SettingsLogic {
    pub fn apply(tracker: &mut Tracker, update: &SettingsUpdate) -> AppResult<Settings> {
        let user = tracker.current_user_mut()?;
        apply_update(&mut user.settings, update)?;
        let settings = user.settings.clone();

        if !update.is_empty() {
            tracker.persist();
        }

        Ok(settings)
    }
}
