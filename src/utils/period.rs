//! Parsing of `--period` / `--range` expressions.
//!
//! Supported:
//! - YYYY, YYYY-MM, YYYY-MM-DD
//! - ranges of the same shape: YYYY:YYYY, YYYY-MM:YYYY-MM, YYYY-MM-DD:YYYY-MM-DD
//! - `all` (no bounds)

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

/// Inclusive day bounds, or `None` for the whole ledger.
pub type DayBounds = Option<(NaiveDate, NaiveDate)>;

pub fn parse_period(p: Option<&str>) -> AppResult<DayBounds> {
    match p.map(str::trim) {
        None => Ok(None),
        Some(r) if r.eq_ignore_ascii_case("all") => Ok(None),
        Some(r) => parse_range(r).map(Some),
    }
}

pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    if let Some((start_raw, end_raw)) = r.split_once(':') {
        let start = start_raw.trim();
        let end = end_raw.trim();

        if start.len() != end.len() {
            return Err(AppError::InvalidPeriod(format!(
                "{r}: start and end must have same format"
            )));
        }

        let (d1, _) = single(start)?;
        let (_, d2) = single(end)?;
        if d2 < d1 {
            return Err(AppError::InvalidPeriod(format!("{r}: end before start")));
        }
        Ok((d1, d2))
    } else {
        single(r.trim())
    }
}

fn single(s: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidPeriod(s.to_string());

    match s.len() {
        // YYYY
        4 => {
            let y: i32 = s.parse().map_err(|_| invalid())?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(invalid)?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 => {
            let d1 = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
                .map_err(|_| invalid())?;
            Ok((d1, last_day_of_month(d1).ok_or_else(invalid)?))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| invalid())?;
            Ok((d, d))
        }
        _ => Err(invalid()),
    }
}

fn last_day_of_month(first: NaiveDate) -> Option<NaiveDate> {
    let (y, m) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)?.pred_opt()
}
