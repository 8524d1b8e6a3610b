use crate::core::reconcile::Adjustment;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::worklog::{DATETIME_FMT, WorklogEntry};
use crate::utils::time::parse_datetime;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SELECT_WORKLOG: &str = "SELECT id, start, end, billable_minutes, description,
        project, activity, skill, source_format, source_mapper, source_file, created_at
 FROM worklogs";

fn to_sql_error(col: usize, e: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(e))
}

pub fn map_row(row: &Row) -> Result<WorklogEntry> {
    let start_str: String = row.get("start")?;
    let end_str: String = row.get("end")?;

    let start = parse_datetime(&start_str).map_err(|e| to_sql_error(1, e))?;
    let end = parse_datetime(&end_str).map_err(|e| to_sql_error(2, e))?;

    Ok(WorklogEntry {
        id: Some(row.get("id")?),
        start,
        end,
        billable_minutes: row.get("billable_minutes")?,
        description: row.get("description")?,
        project: row.get("project")?,
        activity: row.get("activity")?,
        skill: row.get("skill")?,
        source_format: row.get("source_format")?,
        source_mapper: row.get("source_mapper")?,
        source_file: row.get("source_file")?,
        created_at: row.get("created_at")?,
    })
}

/// Insert a worklog and return its new id.
pub fn insert_worklog(conn: &Connection, w: &WorklogEntry) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO worklogs (start, end, billable_minutes, description, project, activity,
                               skill, source_format, source_mapper, source_file, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            w.start_str(),
            w.end_str(),
            w.billable_minutes,
            w.description,
            w.project,
            w.activity,
            w.skill,
            w.source_format,
            w.source_mapper,
            w.source_file,
            w.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn collect(conn: &Connection, sql: &str, args: &[&dyn rusqlite::ToSql]) -> AppResult<Vec<WorklogEntry>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(args, map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Every worklog, ordered by start then id.
pub fn load_all_worklogs(pool: &DbPool) -> AppResult<Vec<WorklogEntry>> {
    collect(
        &pool.conn,
        &format!("{SELECT_WORKLOG} ORDER BY start ASC, id ASC"),
        &[],
    )
}

/// Worklogs starting on any day in `[from, to]`.
pub fn load_worklogs_between(
    pool: &DbPool,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<WorklogEntry>> {
    let lo = from.and_hms_opt(0, 0, 0).map(|d| d.format(DATETIME_FMT).to_string());
    let hi = to
        .succ_opt()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.format(DATETIME_FMT).to_string());

    let (Some(lo), Some(hi)) = (lo, hi) else {
        return Err(AppError::InvalidDate(format!("{from}:{to}")));
    };

    collect(
        &pool.conn,
        &format!("{SELECT_WORKLOG} WHERE start >= ?1 AND start < ?2 ORDER BY start ASC, id ASC"),
        &[&lo, &hi],
    )
}

pub fn load_worklog(pool: &DbPool, id: i64) -> AppResult<Option<WorklogEntry>> {
    let mut stmt = pool.conn.prepare(&format!("{SELECT_WORKLOG} WHERE id = ?1"))?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

pub fn delete_worklog(pool: &DbPool, id: i64) -> AppResult<usize> {
    Ok(pool.conn.execute("DELETE FROM worklogs WHERE id = ?1", [id])?)
}

/// Write back new start/end times, and nothing else, in one transaction.
/// Returns the number of rows whose times actually changed.
pub fn update_worklog_times(pool: &mut DbPool, adjustments: &[Adjustment]) -> AppResult<usize> {
    let tx = pool.conn.transaction()?;
    let mut changed = 0;

    {
        let mut stmt = tx.prepare(
            "UPDATE worklogs SET start = ?1, end = ?2
             WHERE id = ?3 AND (start <> ?1 OR end <> ?2)",
        )?;

        for adj in adjustments {
            let Some(id) = adj.id else { continue };
            changed += stmt.execute(params![fmt(&adj.start), fmt(&adj.end), id])?;
        }
    }

    tx.commit()?;
    Ok(changed)
}

fn fmt(dt: &NaiveDateTime) -> String {
    dt.format(DATETIME_FMT).to_string()
}
