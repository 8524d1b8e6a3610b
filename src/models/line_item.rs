use crate::utils::time::format_minutes_of_day;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One entry of a remote worklog day, as exchanged with the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteLineItem {
    /// Real id assigned by the remote system, or a negative placeholder.
    pub id: i64,
    pub day: NaiveDate,
    pub start_minutes: Option<i64>,
    pub finish_minutes: Option<i64>,
    pub duration_minutes: i64,
    pub billable_minutes: i64,
    pub valuable: bool,
    pub project_id: i64,
    pub activity_id: i64,
    pub skill_id: i64,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub locked: bool,
}

impl RemoteLineItem {
    /// Same slot and same category ids. Comment, billable and duration are
    /// not compared so local edits to them never defeat duplicate detection.
    pub fn is_equivalent(&self, other: &RemoteLineItem) -> bool {
        self.start_minutes == other.start_minutes
            && self.finish_minutes == other.finish_minutes
            && self.project_id == other.project_id
            && self.activity_id == other.activity_id
            && self.skill_id == other.skill_id
    }

    /// Intersecting `[start, finish)` ranges of non-equivalent items.
    /// Items missing either bound never overlap.
    pub fn overlaps(&self, other: &RemoteLineItem) -> bool {
        if self.is_equivalent(other) {
            return false;
        }
        match (
            self.start_minutes,
            self.finish_minutes,
            other.start_minutes,
            other.finish_minutes,
        ) {
            (Some(a_start), Some(a_finish), Some(b_start), Some(b_finish)) => {
                a_start < b_finish && b_start < a_finish
            }
            _ => false,
        }
    }

    pub fn range_label(&self) -> String {
        let fmt = |m: Option<i64>| m.map(format_minutes_of_day).unwrap_or_else(|| "--:--".into());
        format!("{}-{}", fmt(self.start_minutes), fmt(self.finish_minutes))
    }
}

/// Acknowledgement returned by the remote API for each persisted item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistAck {
    pub id: i64,
    #[serde(default)]
    pub temp_id: Option<i64>,
}

/// A project, activity or skill known to the remote system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub locked: bool,
}

/// Snapshot of every name the remote system can resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupSnapshot {
    #[serde(default)]
    pub projects: Vec<LookupRecord>,
    #[serde(default)]
    pub activities: Vec<LookupRecord>,
    #[serde(default)]
    pub skills: Vec<LookupRecord>,
}
