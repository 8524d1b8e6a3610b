use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::conflicts::count_overlaps;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::queries::load_all_worklogs;
use crate::db::stats;
use crate::errors::AppResult;
use crate::models::worklog::WorklogEntry;
use crate::ui::messages::{header, info, success, warning};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Ledger maintenance. Flags run in a fixed order: migrate, info, check, vacuum.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        if *migrate {
            header("migrations");
            run_pending_migrations(&pool.conn)?;
            success("Schema is up to date.");
        }

        if *show_info {
            stats::print_db_info(&mut pool, &cfg.database)?;
        }

        if *check {
            header("integrity");
            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                success("SQLite integrity check passed.");
            } else {
                warning(format!("SQLite integrity check failed: {integrity}"));
            }

            report_conflicting_days(&pool)?;
        }

        if *vacuum {
            header("vacuum");
            pool.conn.execute_batch("VACUUM;")?;
            success("Ledger compacted.");
        }

        if !*migrate && !*show_info && !*check && !*vacuum {
            info("Nothing to do: use --migrate, --info, --check or --vacuum.");
        }
    }

    Ok(())
}

/// Days whose entries still overlap each other.
fn report_conflicting_days(pool: &DbPool) -> AppResult<()> {
    let mut by_day: BTreeMap<NaiveDate, Vec<WorklogEntry>> = BTreeMap::new();
    for e in load_all_worklogs(pool)? {
        by_day.entry(e.day()).or_default().push(e);
    }

    let conflicting: Vec<(NaiveDate, usize)> = by_day
        .iter()
        .map(|(day, entries)| (*day, count_overlaps(entries)))
        .filter(|(_, n)| *n > 0)
        .collect();

    if conflicting.is_empty() {
        success("No day has overlapping worklogs.");
        return Ok(());
    }

    warning(format!(
        "{} day(s) with overlapping worklogs; `rworklog reconcile` can move adjustable imports:",
        conflicting.len()
    ));
    for (day, n) in conflicting {
        println!("    {day}  {n} conflict(s)");
    }
    Ok(())
}
