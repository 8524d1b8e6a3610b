use crate::core::conflicts::count_overlaps;
use crate::db::pool::DbPool;
use crate::db::queries::{load_all_worklogs, load_worklogs_between};
use crate::errors::AppResult;
use crate::models::worklog::WorklogEntry;
use crate::ui::messages::info;
use crate::utils::colors::{RESET, color_for_conflicts};
use crate::utils::formatting::{bold, truncate};
use crate::utils::mins2readable;
use crate::utils::period::DayBounds;
use crate::utils::table::{Column, Table};
use crate::utils::time::format_hhmm;
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub struct ListLogic;

impl ListLogic {
    /// Print the ledger day by day, each day with its overlap count.
    /// Returns the number of listed worklogs.
    pub fn print(pool: &DbPool, bounds: DayBounds, separator_char: &str) -> AppResult<usize> {
        let worklogs = match bounds {
            None => load_all_worklogs(pool)?,
            Some((from, to)) => load_worklogs_between(pool, from, to)?,
        };

        if worklogs.is_empty() {
            info("No worklogs for the selected period.");
            return Ok(0);
        }

        let mut by_day: BTreeMap<NaiveDate, Vec<WorklogEntry>> = BTreeMap::new();
        for w in &worklogs {
            by_day.entry(w.day()).or_default().push(w.clone());
        }

        for (day, entries) in &by_day {
            let conflicts = count_overlaps(entries);
            let worked: i64 = entries.iter().map(WorklogEntry::duration_minutes).sum();

            println!(
                "\n{}  {} entries, {}  conflicts: {}{}{}",
                bold(&day.format("%a %Y-%m-%d").to_string()),
                entries.len(),
                mins2readable(worked, false, false),
                color_for_conflicts(conflicts),
                conflicts,
                RESET
            );

            let mut table = Table::new(vec![
                Column::new("ID", 4),
                Column::new("Start", 5),
                Column::new("End", 5),
                Column::new("Dur", 5),
                Column::new("Bill", 5),
                Column::new("Project", 8),
                Column::new("Activity", 8),
                Column::new("Skill", 6),
                Column::new("Source", 6),
                Column::new("Description", 11),
            ]);

            for e in entries {
                table.add_row(vec![
                    e.id.map(|id| id.to_string()).unwrap_or_default(),
                    format_hhmm(&e.start),
                    format_hhmm(&e.end),
                    mins2readable(e.duration_minutes(), false, true),
                    mins2readable(e.billable_minutes, false, true),
                    truncate(&e.project, 20),
                    truncate(&e.activity, 20),
                    truncate(&e.skill, 16),
                    source_label(e),
                    truncate(&e.description, 40),
                ]);
            }

            print!("{}", table.render(separator_char));
        }

        println!();
        Ok(worklogs.len())
    }
}

fn source_label(e: &WorklogEntry) -> String {
    if e.source_mapper.is_empty() {
        e.source_format.clone()
    } else {
        format!("{}:{}", e.source_format, e.source_mapper)
    }
}
