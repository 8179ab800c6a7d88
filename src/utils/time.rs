//! Time utilities: parsing HH:MM, minute-of-day arithmetic and the serde
//! codec used for clock-in/clock-out fields.

use chrono::{NaiveTime, Timelike};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    let t = t.trim();
    NaiveTime::parse_from_str(t, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M:%S"))
        .ok()
}

pub fn minute_of_day(t: NaiveTime) -> i64 {
    (t.hour() * 60 + t.minute()) as i64
}

/// Same-day difference in minutes; negative when `end` is before `start`.
pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    minute_of_day(end) - minute_of_day(start)
}

/// Serialize a `NaiveTime` as "HH:MM", the format produced by time pickers.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&t.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_time(&raw).ok_or_else(|| D::Error::custom(format!("invalid time '{raw}'")))
    }
}
