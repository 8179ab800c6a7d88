use crate::utils::time::hhmm;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One worked interval on a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub date: NaiveDate, // "YYYY-MM-DD"
    #[serde(with = "hhmm")]
    pub clock_in: NaiveTime, // "HH:MM"
    #[serde(with = "hhmm")]
    pub clock_out: NaiveTime, // "HH:MM"
    pub hours: f64,
    pub id: i64, // creation timestamp (ms)
}

impl Entry {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn clock_in_str(&self) -> String {
        self.clock_in.format("%H:%M").to_string()
    }

    pub fn clock_out_str(&self) -> String {
        self.clock_out.format("%H:%M").to_string()
    }
}
