use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if the `worklogs` table exists.
fn worklogs_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='worklogs'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create the `worklogs` table.
fn create_worklogs_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS worklogs (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            start            TEXT NOT NULL,
            end              TEXT NOT NULL,
            billable_minutes INTEGER NOT NULL DEFAULT 0,
            description      TEXT NOT NULL DEFAULT '',
            project          TEXT NOT NULL DEFAULT '',
            activity         TEXT NOT NULL DEFAULT '',
            skill            TEXT NOT NULL DEFAULT '',
            source_format    TEXT NOT NULL DEFAULT 'manual',
            source_mapper    TEXT NOT NULL DEFAULT '',
            source_file      TEXT NOT NULL DEFAULT '',
            created_at       TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_worklogs_start ON worklogs(start);
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Provenance lookups (reconcile selects adjustable entries by mapper).
fn migrate_add_provenance_index(conn: &Connection) -> Result<()> {
    let version = "20260302_0002_add_worklog_provenance_index";

    if is_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_worklogs_provenance
         ON worklogs(source_mapper, source_file);",
    )?;

    mark_applied(conn, version, "Added provenance index to worklogs")?;

    success(format!(
        "Migration applied: {} → indexed worklogs provenance",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if !worklogs_table_exists(conn)? {
        create_worklogs_table(conn)?;
        success("Created worklogs table.");
    }

    migrate_add_provenance_index(conn)?;

    Ok(())
}
