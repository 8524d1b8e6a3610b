use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::worklog::WorklogEntry;
use crate::utils::time::{at, parse_date};

/// Add a manual worklog.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        date,
        start,
        end,
        project,
        activity,
        skill,
        billable,
        description,
        mapper,
        source_file,
    } = cmd
    {
        //
        // 1. Parse day and times
        //
        let day = parse_date(date).ok_or_else(|| AppError::InvalidDate(date.to_string()))?;
        let start = at(day, start)?;
        let end = at(day, end)?;

        //
        // 2. Build the entry
        //
        let mut entry = WorklogEntry::new(start, end, project, activity, skill);
        if let Some(b) = billable {
            entry.billable_minutes = *b;
        }
        if let Some(d) = description {
            entry.description = d.clone();
        }
        if let Some(m) = mapper {
            entry.source_mapper = m.clone();
        }
        if let Some(f) = source_file {
            entry.source_file = f.clone();
        }

        //
        // 3. Store
        //
        let mut pool = DbPool::open(&cfg.database)?;
        AddLogic::apply(&mut pool, &entry)?;
    }

    Ok(())
}
