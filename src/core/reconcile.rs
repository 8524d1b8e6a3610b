//! Day reconciler: removes the overlaps an aggregate-only import leaves
//! behind by sliding its entries around the trusted ones.
//!
//! Entries from an *adjustable* source (selected by provenance) are placed
//! greedily, earliest first, into the first free slot at or after their
//! original start. Every other entry is a fixed obstacle. The placement is
//! first-fit and order dependent: it keeps results deterministic, it does
//! not search for the layout with the least total displacement.

use crate::config::ReconcileConfig;
use crate::core::conflicts::count_overlaps;
use crate::core::interval_set::IntervalSet;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{load_all_worklogs, load_worklogs_between, update_worklog_times};
use crate::errors::{AppError, AppResult, EntryRef};
use crate::models::interval::Interval;
use crate::models::name_tuple::normalize_name;
use crate::models::worklog::WorklogEntry;
use crate::ui::messages::{info, success, warning};
use crate::utils::period::DayBounds;
use crate::utils::table::{Column, Table};
use crate::utils::time::format_hhmm;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;

/// Decides which entries the reconciler may move.
#[derive(Debug, Clone)]
pub struct AdjustableSource {
    mappers: Vec<String>,
    file_pattern: Option<Regex>,
}

impl AdjustableSource {
    pub fn new(mappers: &[String], file_pattern: Option<&str>) -> AppResult<Self> {
        let file_pattern = match file_pattern.map(str::trim).filter(|p| !p.is_empty()) {
            Some(p) => Some(Regex::new(p).map_err(|e| {
                AppError::Config(format!("invalid adjustable_file_pattern '{p}': {e}"))
            })?),
            None => None,
        };

        Ok(Self {
            mappers: mappers
                .iter()
                .map(|m| normalize_name(m))
                .filter(|m| !m.is_empty())
                .collect(),
            file_pattern,
        })
    }

    pub fn from_config(cfg: &ReconcileConfig) -> AppResult<Self> {
        Self::new(&cfg.adjustable_mappers, cfg.adjustable_file_pattern.as_deref())
    }

    pub fn is_adjustable(&self, entry: &WorklogEntry) -> bool {
        let mapper = normalize_name(&entry.source_mapper);
        if !mapper.is_empty() && self.mappers.contains(&mapper) {
            return true;
        }

        match &self.file_pattern {
            Some(re) if !entry.source_file.is_empty() => {
                let name = Path::new(&entry.source_file)
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| entry.source_file.clone());
                re.is_match(&name)
            }
            _ => false,
        }
    }
}

/// New times for one moved entry. Only these two fields may be written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Adjustment {
    pub id: Option<i64>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayReconciliation {
    pub day: NaiveDate,
    pub adjustments: Vec<Adjustment>,
}

impl DayReconciliation {
    pub fn count(&self) -> usize {
        self.adjustments.len()
    }
}

/// Earliest start at or after `desired` where `duration` fits between the
/// busy intervals. `None` when the candidate runs past the calendar's range.
fn first_fit(
    busy: &[Interval],
    desired: NaiveDateTime,
    duration: TimeDelta,
) -> Option<NaiveDateTime> {
    let mut candidate = desired;
    for iv in busy {
        if iv.end <= candidate {
            continue;
        }
        if candidate.checked_add_signed(duration)? <= iv.start {
            break;
        }
        candidate = iv.end;
    }
    Some(candidate)
}

/// Placement for one day: (index into `entries`, new interval) per moved entry.
fn plan_day(
    day: NaiveDate,
    entries: &[WorklogEntry],
    source: &AdjustableSource,
) -> Vec<(usize, Interval)> {
    let mut busy = IntervalSet::new();
    let mut adjustable: Vec<usize> = Vec::new();

    for (i, e) in entries.iter().enumerate() {
        if e.day() != day {
            continue;
        }
        if source.is_adjustable(e) {
            adjustable.push(i);
        } else {
            busy.insert(e.interval());
        }
    }

    adjustable.sort_by_key(|&i| (entries[i].start, entries[i].id.unwrap_or(i64::MAX)));

    let mut moved = Vec::new();

    for i in adjustable {
        let e = &entries[i];

        let duration = if e.end > e.start {
            Some(e.end - e.start)
        } else {
            TimeDelta::try_minutes(e.billable_minutes)
        };
        let duration = match duration {
            Some(d) if d <= TimeDelta::zero() => continue,
            Some(d) if d <= TimeDelta::days(1) => d,
            // Longer than a day, or beyond what a time delta holds: unmovable.
            _ => {
                busy.insert(e.interval());
                continue;
            }
        };

        let slot = first_fit(busy.as_slice(), e.start, duration)
            .and_then(|start| Some((start, start.checked_add_signed(duration)?)));

        // An end at 00:00 of the next day leaves the day, as for cross-day
        // entries in the batch builder. Such an entry stays put as an obstacle.
        let (new_start, new_end) = match slot {
            Some((s, end)) if s.date() == day && end.date() == day => (s, end),
            _ => {
                busy.insert(e.interval());
                continue;
            }
        };

        let placed = Interval::new(new_start, new_end);
        if new_start != e.start || new_end != e.end {
            moved.push((i, placed));
        }
        busy.insert(placed);
    }

    moved
}

/// One reconciliation pass over `day`. `entries` may contain other days;
/// only entries starting on `day` are considered.
pub fn reconcile_day(
    day: NaiveDate,
    entries: &[WorklogEntry],
    source: &AdjustableSource,
) -> DayReconciliation {
    let adjustments = plan_day(day, entries, source)
        .into_iter()
        .map(|(i, iv)| Adjustment {
            id: entries[i].id,
            start: iv.start,
            end: iv.end,
        })
        .collect();

    DayReconciliation { day, adjustments }
}

/// Per-day figures of a full reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayReport {
    pub day: NaiveDate,
    pub entries: usize,
    pub conflicts_before: usize,
    pub conflicts_after: usize,
    pub adjusted: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconcileOutcome {
    pub days: Vec<DayReport>,
    /// Net changes against the input (entries moved back to their original
    /// slot by a later pass are not listed).
    pub adjustments: Vec<Adjustment>,
    pub passes: usize,
    pub entries: Vec<WorklogEntry>,
}

impl ReconcileOutcome {
    pub fn adjusted_count(&self) -> usize {
        self.adjustments.len()
    }
}

/// Reconcile every day present in `entries`, repeating passes until no entry
/// moves or `max_passes` is reached.
pub fn reconcile_until_stable(
    entries: &[WorklogEntry],
    source: &AdjustableSource,
    max_passes: usize,
) -> ReconcileOutcome {
    let days: BTreeSet<NaiveDate> = entries.iter().map(WorklogEntry::day).collect();
    let mut current = entries.to_vec();
    let mut passes = 0;

    while passes < max_passes.max(1) {
        passes += 1;
        let mut moved_any = false;

        for &day in &days {
            for (i, iv) in plan_day(day, &current, source) {
                current[i].start = iv.start;
                current[i].end = iv.end;
                moved_any = true;
            }
        }

        if !moved_any {
            break;
        }
    }

    let adjustments: Vec<Adjustment> = entries
        .iter()
        .zip(&current)
        .filter(|(before, after)| before.start != after.start || before.end != after.end)
        .map(|(_, after)| Adjustment {
            id: after.id,
            start: after.start,
            end: after.end,
        })
        .collect();

    let days = days
        .into_iter()
        .map(|day| {
            let before: Vec<WorklogEntry> =
                entries.iter().filter(|e| e.day() == day).cloned().collect();
            let after: Vec<WorklogEntry> =
                current.iter().filter(|e| e.day() == day).cloned().collect();
            let adjusted = entries
                .iter()
                .zip(&current)
                .filter(|(b, a)| b.day() == day && (b.start != a.start || b.end != a.end))
                .count();

            DayReport {
                day,
                entries: before.len(),
                conflicts_before: count_overlaps(&before),
                conflicts_after: count_overlaps(&after),
                adjusted,
            }
        })
        .collect();

    ReconcileOutcome {
        days,
        adjustments,
        passes,
        entries: current,
    }
}

/// The `reconcile` command: load, reconcile, report, write back.
pub struct ReconcileLogic;

impl ReconcileLogic {
    pub fn apply(
        pool: &mut DbPool,
        cfg: &ReconcileConfig,
        bounds: DayBounds,
        dry_run: bool,
        separator_char: &str,
    ) -> AppResult<ReconcileOutcome> {
        let source = AdjustableSource::from_config(cfg)?;

        let entries = match bounds {
            None => load_all_worklogs(pool)?,
            Some((from, to)) => load_worklogs_between(pool, from, to)?,
        };

        if entries.is_empty() {
            info("No worklogs for the selected period.");
            return Ok(reconcile_until_stable(&[], &source, cfg.max_passes));
        }

        let outcome = reconcile_until_stable(&entries, &source, cfg.max_passes);

        let mut table = Table::new(vec![
            Column::new("Day", 14),
            Column::new("Entries", 7),
            Column::new("Before", 6),
            Column::new("After", 5),
            Column::new("Moved", 5),
        ]);
        for d in &outcome.days {
            table.add_row(vec![
                d.day.format("%a %Y-%m-%d").to_string(),
                d.entries.to_string(),
                d.conflicts_before.to_string(),
                d.conflicts_after.to_string(),
                d.adjusted.to_string(),
            ]);
        }
        print!("{}", table.render(separator_char));

        for d in outcome.days.iter().filter(|d| d.conflicts_after > 0) {
            warning(format!(
                "{}: {} overlap(s) left that cannot be resolved inside the day",
                d.day, d.conflicts_after
            ));
        }

        if outcome.adjustments.is_empty() {
            success(format!("Nothing to adjust ({} pass(es)).", outcome.passes));
            return Ok(outcome);
        }

        if dry_run {
            for adj in &outcome.adjustments {
                info(format!(
                    "would move {} to {} → {}",
                    EntryRef(adj.id),
                    adj.start.format("%Y-%m-%d %H:%M"),
                    format_hhmm(&adj.end)
                ));
            }
            info(format!(
                "Dry run: {} entr(y/ies) would be moved, nothing written.",
                outcome.adjusted_count()
            ));
            return Ok(outcome);
        }

        let changed = update_worklog_times(pool, &outcome.adjustments)?;

        for d in outcome.days.iter().filter(|d| d.adjusted > 0) {
            ttlog(
                &pool.conn,
                "reconcile",
                &d.day.to_string(),
                &format!(
                    "{} entries moved, conflicts {} → {}",
                    d.adjusted, d.conflicts_before, d.conflicts_after
                ),
            )?;
        }

        success(format!(
            "Reconciled {} entr(y/ies) in {} pass(es).",
            changed, outcome.passes
        ));

        Ok(outcome)
    }
}
