use super::interval::Interval;
use super::name_tuple::NameTuple;
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Serialize;

pub const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

/// A locally stored time-tracking entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorklogEntry {
    pub id: Option<i64>,         // ⇔ worklogs.id (unset before insert)
    pub start: NaiveDateTime,    // ⇔ worklogs.start (TEXT "YYYY-MM-DD HH:MM:SS")
    pub end: NaiveDateTime,      // ⇔ worklogs.end
    pub billable_minutes: i64,   // ⇔ worklogs.billable_minutes
    pub description: String,     // ⇔ worklogs.description
    pub project: String,         // ⇔ worklogs.project
    pub activity: String,        // ⇔ worklogs.activity
    pub skill: String,           // ⇔ worklogs.skill
    pub source_format: String,   // ⇔ worklogs.source_format ('manual', 'csv', 'xlsx', ...)
    pub source_mapper: String,   // ⇔ worklogs.source_mapper
    pub source_file: String,     // ⇔ worklogs.source_file
    pub created_at: String,      // ⇔ worklogs.created_at (ISO8601)
}

impl WorklogEntry {
    /// Entry created by hand: billable equals the wall-clock duration,
    /// provenance is `manual`.
    pub fn new(
        start: NaiveDateTime,
        end: NaiveDateTime,
        project: &str,
        activity: &str,
        skill: &str,
    ) -> Self {
        Self {
            id: None,
            start,
            end,
            billable_minutes: (end - start).num_minutes().max(0),
            description: String::new(),
            project: project.to_string(),
            activity: activity.to_string(),
            skill: skill.to_string(),
            source_format: "manual".to_string(),
            source_mapper: String::new(),
            source_file: String::new(),
            created_at: Local::now().to_rfc3339(),
        }
    }

    /// Calendar day the entry belongs to (the day it starts on).
    pub fn day(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    pub fn is_same_day(&self) -> bool {
        self.start.date() == self.end.date()
    }

    pub fn name_tuple(&self) -> NameTuple {
        NameTuple::new(
            &self.source_mapper,
            &self.project,
            &self.activity,
            &self.skill,
        )
    }

    pub fn start_str(&self) -> String {
        self.start.format(DATETIME_FMT).to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format(DATETIME_FMT).to_string()
    }
}
