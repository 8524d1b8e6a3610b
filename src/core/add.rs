use crate::core::batch::validate_entry;
use crate::core::conflicts::count_overlaps;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_worklog, load_worklogs_between};
use crate::errors::AppResult;
use crate::models::worklog::WorklogEntry;
use crate::ui::messages::{success, warning};
use crate::utils::time::format_hhmm;

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    /// Insert a manual entry and report whether its day now has overlaps.
    /// Returns the new id.
    pub fn apply(pool: &mut DbPool, entry: &WorklogEntry) -> AppResult<i64> {
        validate_entry(entry)?;

        let id = insert_worklog(&pool.conn, entry)?;

        let summary = format!(
            "{} {}-{} {} / {} / {}",
            entry.day(),
            format_hhmm(&entry.start),
            format_hhmm(&entry.end),
            entry.project,
            entry.activity,
            entry.skill
        );
        ttlog(&pool.conn, "add", &format!("#{id}"), &summary)?;

        success(format!("Added worklog #{id}: {summary}"));

        let day = entry.day();
        let same_day = load_worklogs_between(pool, day, day)?;
        let conflicts = count_overlaps(&same_day);
        if conflicts > 0 {
            warning(format!(
                "{day} now has {conflicts} overlapping pair(s); run `rworklog reconcile --period {day}`"
            ));
        }

        Ok(id)
    }
}
