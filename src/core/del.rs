use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_worklog, load_worklog};
use crate::errors::{AppError, AppResult};
use crate::models::worklog::WorklogEntry;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Remove one worklog by id and return what was removed.
    pub fn apply(pool: &mut DbPool, id: i64) -> AppResult<WorklogEntry> {
        let entry = load_worklog(pool, id)?.ok_or(AppError::NotFound(id))?;

        if delete_worklog(pool, id)? == 0 {
            return Err(AppError::NotFound(id));
        }

        ttlog(
            &pool.conn,
            "del",
            &format!("#{id}"),
            &format!(
                "{} → {} {} / {} / {}",
                entry.start_str(),
                entry.end_str(),
                entry.project,
                entry.activity,
                entry.skill
            ),
        )?;

        Ok(entry)
    }
}
