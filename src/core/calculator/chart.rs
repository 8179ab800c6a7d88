//! Half-month aggregates for the hours and earnings charts.
//!
//! Period keys carry the month but not the year, so the same half-month of
//! different years lands in one bucket.

use super::cycle::CycleHalf;
use crate::models::Entry;
use crate::utils::date::short_month_name;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Number of most recent periods kept for display.
pub const CHART_PERIODS: usize = 6;

/// Year used to order month keys chronologically.
const REFERENCE_YEAR: i32 = 2024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeriodKey {
    pub month: u32,
    pub half: CycleHalf,
}

impl PeriodKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            half: CycleHalf::of(date),
        }
    }

    /// "1st half of Jan".
    pub fn label(&self) -> String {
        let month = NaiveDate::from_ymd_opt(REFERENCE_YEAR, self.month, 1)
            .map(short_month_name)
            .unwrap_or_default();
        format!("{} half of {}", self.half.ordinal(), month)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodTotal {
    pub period: String,
    pub value: f64,
}

fn aggregate<F>(entries: &[Entry], value: F) -> Vec<PeriodTotal>
where
    F: Fn(&Entry) -> f64,
{
    let mut buckets: BTreeMap<PeriodKey, f64> = BTreeMap::new();
    for e in entries {
        *buckets.entry(PeriodKey::of(e.date)).or_insert(0.0) += value(e);
    }

    let skip = buckets.len().saturating_sub(CHART_PERIODS);
    buckets
        .into_iter()
        .skip(skip)
        .map(|(key, value)| PeriodTotal {
            period: key.label(),
            value,
        })
        .collect()
}

pub fn hours_by_period(entries: &[Entry]) -> Vec<PeriodTotal> {
    aggregate(entries, |e| e.hours)
}

/// Earnings use the rate passed in now, not the rate at the time of work.
pub fn earnings_by_period(entries: &[Entry], hourly_rate: f64) -> Vec<PeriodTotal> {
    aggregate(entries, |e| e.hours * hourly_rate)
}
