use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Last calendar day (28..=31) of the month containing `date`.
pub fn last_day_of_month(date: NaiveDate) -> u32 {
    let (y, m) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

/// Full English month name ("January").
pub fn month_name(date: NaiveDate) -> String {
    date.format("%B").to_string()
}

/// Abbreviated English month name ("Jan").
pub fn short_month_name(date: NaiveDate) -> String {
    date.format("%b").to_string()
}
