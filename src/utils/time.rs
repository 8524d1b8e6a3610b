//! Time utilities: parsing HH:MM and timestamps, minutes-of-day helpers.

use crate::errors::{AppError, AppResult};
use crate::models::worklog::DATETIME_FMT;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M:%S"))
        .ok()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse a stored timestamp. Accepts the canonical `YYYY-MM-DD HH:MM:SS`
/// as well as the `T`-separated and minute-only variants.
pub fn parse_datetime(s: &str) -> AppResult<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        DATETIME_FMT,
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];

    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s.trim(), fmt).ok())
        .ok_or_else(|| AppError::InvalidTime(s.to_string()))
}

/// Combine a day and an `HH:MM` string.
pub fn at(day: NaiveDate, hhmm: &str) -> AppResult<NaiveDateTime> {
    let t = parse_time(hhmm).ok_or_else(|| AppError::InvalidTime(hhmm.to_string()))?;
    Ok(day.and_time(t))
}

pub fn minutes_from_midnight(dt: &NaiveDateTime) -> i64 {
    i64::from(dt.hour()) * 60 + i64::from(dt.minute())
}

pub fn format_minutes_of_day(mins: i64) -> String {
    format!("{:02}:{:02}", mins / 60, mins % 60)
}

pub fn format_hhmm(dt: &NaiveDateTime) -> String {
    dt.format("%H:%M").to_string()
}
