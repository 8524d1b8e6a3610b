use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) TOTAL WORKLOGS
    //
    let count: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM worklogs", [], |row| row.get(0))?;
    println!(
        "{}• Total worklogs:{} {}{}{}",
        CYAN, RESET, GREEN, count, RESET
    );

    //
    // 3) DATE RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row(
            "SELECT substr(start, 1, 10) FROM worklogs ORDER BY start ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;
    let last: Option<String> = pool
        .conn
        .query_row(
            "SELECT substr(start, 1, 10) FROM worklogs ORDER BY start DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    match (first, last) {
        (Some(f), Some(l)) => println!("{}• Range:{} {} → {}", CYAN, RESET, f, l),
        _ => println!("{}• Range:{} {}(empty){}", CYAN, RESET, GREY, RESET),
    }

    //
    // 4) PROVENANCE
    //
    let mut stmt = pool.conn.prepare(
        "SELECT source_format, source_mapper, COUNT(*) FROM worklogs
         GROUP BY source_format, source_mapper
         ORDER BY source_format, source_mapper",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, i64>(2)?,
        ))
    })?;

    println!("{}• Sources:{}", CYAN, RESET);
    for r in rows {
        let (format, mapper, n) = r?;
        let mapper = if mapper.is_empty() { "-".to_string() } else { mapper };
        println!("    {:<10} {:<20} {}", format, mapper, n);
    }

    println!();
    Ok(())
}
