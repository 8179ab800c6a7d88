//! Half-month pay cycles: days 1..=15 and 16..=end of month.

use crate::models::{Entry, Settings};
use crate::utils::date::{last_day_of_month, month_name};
use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CycleHalf {
    First,
    Second,
}

impl CycleHalf {
    pub fn of(date: NaiveDate) -> Self {
        if date.day() <= 15 {
            CycleHalf::First
        } else {
            CycleHalf::Second
        }
    }

    /// "1st" / "2nd", used in chart period keys.
    pub fn ordinal(&self) -> &'static str {
        match self {
            CycleHalf::First => "1st",
            CycleHalf::Second => "2nd",
        }
    }

    /// "First" / "Second", used in cycle labels.
    pub fn word(&self) -> &'static str {
        match self {
            CycleHalf::First => "First",
            CycleHalf::Second => "Second",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CycleStats {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_hours: f64,
    pub remaining_hours: f64,
    pub earnings: f64,
    pub cycle_label: String,
}

/// Inclusive first and last day of the cycle containing `today`.
pub fn cycle_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let (first, last) = match CycleHalf::of(today) {
        CycleHalf::First => (1, 15),
        CycleHalf::Second => (16, last_day_of_month(today)),
    };

    (
        today.with_day(first).unwrap_or(today),
        today.with_day(last).unwrap_or(today),
    )
}

/// "First half of March 2024".
pub fn cycle_label(today: NaiveDate) -> String {
    format!(
        "{} half of {} {}",
        CycleHalf::of(today).word(),
        month_name(today),
        today.year()
    )
}

/// Totals for the cycle containing `today`. Pure: nothing here is cached.
pub fn current_cycle_stats(entries: &[Entry], settings: &Settings, today: NaiveDate) -> CycleStats {
    let (start, end) = cycle_bounds(today);

    let total_hours: f64 = entries
        .iter()
        .filter(|e| e.date >= start && e.date <= end)
        .map(|e| e.hours)
        .sum();

    CycleStats {
        start,
        end,
        total_hours,
        remaining_hours: (settings.target_hours_per_cycle - total_hours).max(0.0),
        earnings: total_hours * settings.hourly_rate,
        cycle_label: cycle_label(today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entry(date: &str, hours: f64, id: i64) -> Entry {
        Entry {
            date: d(date),
            clock_in: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            clock_out: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            hours,
            id,
        }
    }

    fn month_of_entries() -> Vec<Entry> {
        vec![
            entry("2024-02-29", 1.0, 1),
            entry("2024-03-01", 2.0, 2),
            entry("2024-03-15", 4.0, 3),
            entry("2024-03-16", 8.0, 4),
            entry("2024-03-31", 16.0, 5),
            entry("2024-04-01", 32.0, 6),
        ]
    }

    #[test]
    fn first_half_includes_days_1_to_15() {
        let stats = current_cycle_stats(&month_of_entries(), &Settings::default(), d("2024-03-10"));
        assert_eq!(stats.start, d("2024-03-01"));
        assert_eq!(stats.end, d("2024-03-15"));
        assert_eq!(stats.total_hours, 6.0);
        assert_eq!(stats.cycle_label, "First half of March 2024");
    }

    #[test]
    fn second_half_runs_to_month_end() {
        let stats = current_cycle_stats(&month_of_entries(), &Settings::default(), d("2024-03-20"));
        assert_eq!(stats.start, d("2024-03-16"));
        assert_eq!(stats.end, d("2024-03-31"));
        assert_eq!(stats.total_hours, 24.0);
        assert_eq!(stats.cycle_label, "Second half of March 2024");
    }

    #[test]
    fn second_half_of_short_month_stops_at_last_day() {
        let (start, end) = cycle_bounds(d("2023-02-28"));
        assert_eq!(start, d("2023-02-16"));
        assert_eq!(end, d("2023-02-28"));

        let (_, end) = cycle_bounds(d("2024-04-16"));
        assert_eq!(end, d("2024-04-30"));
    }

    #[test]
    fn remaining_hours_never_negative() {
        let settings = Settings::default(); // 65h target
        let entries = vec![entry("2024-03-02", 30.0, 1), entry("2024-03-03", 10.0, 2)];
        let stats = current_cycle_stats(&entries, &settings, d("2024-03-10"));
        assert_eq!(stats.total_hours, 40.0);
        assert_eq!(stats.remaining_hours, 25.0);

        let entries = vec![entry("2024-03-02", 70.0, 1)];
        let stats = current_cycle_stats(&entries, &settings, d("2024-03-10"));
        assert_eq!(stats.remaining_hours, 0.0);
    }

    #[test]
    fn earnings_use_hourly_rate() {
        let settings = Settings {
            hourly_rate: 20.0,
            ..Settings::default()
        };
        let entries = vec![entry("2024-03-02", 7.5, 1)];
        let stats = current_cycle_stats(&entries, &settings, d("2024-03-10"));
        assert_eq!(stats.earnings, 150.0);
    }

    #[test]
    fn empty_cycle() {
        let stats = current_cycle_stats(&[], &Settings::default(), d("2024-03-10"));
        assert_eq!(stats.total_hours, 0.0);
        assert_eq!(stats.remaining_hours, 65.0);
        assert_eq!(stats.earnings, 0.0);
    }
}
