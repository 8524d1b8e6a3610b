//! Groups resolved local entries into per-day submission batches.

use crate::errors::{AppError, AppResult, Violation};
use crate::models::day_batch::DayBatch;
use crate::models::line_item::RemoteLineItem;
use crate::models::name_tuple::{NameTuple, ResolvedIds};
use crate::models::worklog::WorklogEntry;
use crate::utils::time::minutes_from_midnight;
use std::collections::{BTreeMap, HashMap};

/// Checks that need no remote identifiers. Run before any network call.
pub fn validate_entry(entry: &WorklogEntry) -> AppResult<()> {
    let fail = |violation| Err(AppError::validation(entry.id, violation));

    for (field, value) in [
        ("project", &entry.project),
        ("activity", &entry.activity),
        ("skill", &entry.skill),
    ] {
        if value.trim().is_empty() {
            return fail(Violation::BlankName(field));
        }
    }

    if !entry.is_same_day() {
        return fail(Violation::CrossDay {
            start: entry.start,
            end: entry.end,
        });
    }

    let duration = entry.duration_minutes();
    if duration <= 0 {
        return fail(Violation::NonPositiveDuration(duration));
    }

    if entry.billable_minutes < 0 {
        return fail(Violation::NegativeBillable(entry.billable_minutes));
    }

    Ok(())
}

fn checked_ids(entry: &WorklogEntry, ids: &ResolvedIds) -> AppResult<()> {
    for (field, value) in [
        ("project", ids.project_id),
        ("activity", ids.activity_id),
        ("skill", ids.skill_id),
    ] {
        if value <= 0 {
            return Err(AppError::validation(
                entry.id,
                Violation::NonPositiveId { field, value },
            ));
        }
    }
    Ok(())
}

/// Build one batch per calendar day, days ascending.
///
/// Entries are ordered by (start, id) first; each one gets a placeholder id
/// counting down from -1 across all days. Any invalid entry fails the
/// whole build.
pub fn build_day_batches(
    entries: &[WorklogEntry],
    resolved: &HashMap<NameTuple, ResolvedIds>,
) -> AppResult<Vec<DayBatch>> {
    let mut sorted: Vec<&WorklogEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| (e.start, e.id.unwrap_or(i64::MAX)));

    let mut by_day: BTreeMap<chrono::NaiveDate, Vec<RemoteLineItem>> = BTreeMap::new();
    let mut next_placeholder: i64 = -1;

    for entry in sorted {
        validate_entry(entry)?;

        let tuple = entry.name_tuple();
        let ids = resolved.get(&tuple).ok_or_else(|| {
            AppError::validation(entry.id, Violation::Unresolved(tuple.to_string()))
        })?;
        checked_ids(entry, ids)?;

        let day = entry.day();
        let item = RemoteLineItem {
            id: next_placeholder,
            day,
            start_minutes: Some(minutes_from_midnight(&entry.start)),
            finish_minutes: Some(minutes_from_midnight(&entry.end)),
            duration_minutes: entry.duration_minutes(),
            billable_minutes: entry.billable_minutes,
            valuable: entry.billable_minutes > 0,
            project_id: ids.project_id,
            activity_id: ids.activity_id,
            skill_id: ids.skill_id,
            comment: entry.description.trim().to_string(),
            locked: false,
        };
        next_placeholder -= 1;

        by_day.entry(day).or_default().push(item);
    }

    Ok(by_day
        .into_iter()
        .map(|(day, items)| DayBatch { day, items })
        .collect())
}
