// src/export/model.rs

use crate::models::worklog::WorklogEntry;
use crate::utils::time::format_hhmm;
use serde::Serialize;

/// Flat row written by every export format.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct WorklogExport {
    pub id: i64,
    pub date: String,
    pub start: String,
    pub end: String,
    pub duration_minutes: i64,
    pub billable_minutes: i64,
    pub project: String,
    pub activity: String,
    pub skill: String,
    pub description: String,
    pub source_format: String,
    pub source_mapper: String,
    pub source_file: String,
}

impl From<&WorklogEntry> for WorklogExport {
    fn from(w: &WorklogEntry) -> Self {
        Self {
            id: w.id.unwrap_or_default(),
            date: w.day().format("%Y-%m-%d").to_string(),
            start: format_hhmm(&w.start),
            end: format_hhmm(&w.end),
            duration_minutes: w.duration_minutes(),
            billable_minutes: w.billable_minutes,
            project: w.project.clone(),
            activity: w.activity.clone(),
            skill: w.skill.clone(),
            description: w.description.clone(),
            source_format: w.source_format.clone(),
            source_mapper: w.source_mapper.clone(),
            source_file: w.source_file.clone(),
        }
    }
}
