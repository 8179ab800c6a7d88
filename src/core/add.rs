use crate::core::tracker::Tracker;
use crate::errors::{AppError, AppResult};
use crate::models::Entry;
use crate::utils::{date, time};
use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

/// Worked hours between two times of the same day. Non-positive when
/// `clock_out` is not after `clock_in`; there is no wrap past midnight.
pub fn compute_hours(clock_in: NaiveTime, clock_out: NaiveTime) -> f64 {
    time::minutes_between(clock_in, clock_out) as f64 / 60.0
}

/// Parse raw form fields into a dated time pair.
pub fn parse_fields(
    date_raw: &str,
    clock_in_raw: &str,
    clock_out_raw: &str,
) -> AppResult<(NaiveDate, NaiveTime, NaiveTime)> {
    if [date_raw, clock_in_raw, clock_out_raw]
        .iter()
        .any(|f| f.trim().is_empty())
    {
        return Err(AppError::Validation("Please fill in all fields".into()));
    }

    let d = date::parse_date(date_raw).ok_or_else(|| AppError::InvalidDate(date_raw.into()))?;
    let cin =
        time::parse_time(clock_in_raw).ok_or_else(|| AppError::InvalidTime(clock_in_raw.into()))?;
    let cout = time::parse_time(clock_out_raw)
        .ok_or_else(|| AppError::InvalidTime(clock_out_raw.into()))?;

    Ok((d, cin, cout))
}

/// Build an entry, rejecting empty or inverted ranges.
pub fn build_entry(
    id: i64,
    date: NaiveDate,
    clock_in: NaiveTime,
    clock_out: NaiveTime,
) -> AppResult<Entry> {
    let hours = compute_hours(clock_in, clock_out);
    if hours <= 0.0 {
        return Err(AppError::InvalidRange {
            clock_in,
            clock_out,
        });
    }

    Ok(Entry {
        date,
        clock_in,
        clock_out,
        hours,
        id,
    })
}

/// Creation timestamp in ms, bumped past every existing id.
pub fn next_entry_id(entries: &[Entry], now_ms: i64) -> AppResult<i64> {
    match entries.iter().map(|e| e.id).max() {
        Some(max) if max >= now_ms => max
            .checked_add(1)
            .ok_or_else(|| AppError::Validation("No entry id left: stored ids are exhausted".into())),
        _ => Ok(now_ms),
    }
}

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    pub fn apply(
        tracker: &mut Tracker,
        date_raw: &str,
        clock_in_raw: &str,
        clock_out_raw: &str,
    ) -> AppResult<Entry> {
        let (d, cin, cout) = parse_fields(date_raw, clock_in_raw, clock_out_raw)?;
        let now_ms = chrono::Local::now().timestamp_millis();

        let user = tracker.current_user_mut()?;
        let entry = build_entry(next_entry_id(&user.entries, now_ms)?, d, cin, cout)?;
        user.entries.push(entry.clone());

        debug!(id = entry.id, date = %entry.date, hours = entry.hours, "entry added");
        tracker.persist();

        Ok(entry)
    }
}

/// Entries sorted by date, newest first; equal dates keep insertion order.
pub fn entries_newest_first(entries: &[Entry]) -> Vec<&Entry> {
    let mut sorted: Vec<&Entry> = entries.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}
