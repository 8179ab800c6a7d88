use serde::{Deserialize, Serialize};

pub const DEFAULT_DAILY_HOURS: f64 = 6.5;
pub const DEFAULT_WORKING_DAYS: u32 = 10;

/// Per-user pay settings, stored with camelCase keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub hourly_rate: f64,
    pub daily_hours: f64,
    pub working_days: u32,
    /// Stored on its own: recomputed from `daily_hours * working_days` when
    /// either changes, but may be overridden afterwards.
    pub target_hours_per_cycle: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hourly_rate: 0.0,
            daily_hours: DEFAULT_DAILY_HOURS,
            working_days: DEFAULT_WORKING_DAYS,
            target_hours_per_cycle: DEFAULT_DAILY_HOURS * DEFAULT_WORKING_DAYS as f64,
        }
    }
}

impl Settings {
    pub fn computed_target(&self) -> f64 {
        self.daily_hours * self.working_days as f64
    }

    pub fn set_daily_hours(&mut self, hours: f64) {
        self.daily_hours = hours;
        self.target_hours_per_cycle = self.computed_target();
    }

    pub fn set_working_days(&mut self, days: u32) {
        self.working_days = days;
        self.target_hours_per_cycle = self.computed_target();
    }
}

/// A partial settings edit; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsUpdate {
    pub hourly_rate: Option<f64>,
    pub daily_hours: Option<f64>,
    pub working_days: Option<u32>,
    pub target_hours: Option<f64>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        self.hourly_rate.is_none()
            && self.daily_hours.is_none()
            && self.working_days.is_none()
            && self.target_hours.is_none()
    }
}
