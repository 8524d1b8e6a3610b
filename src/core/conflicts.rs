//! Overlap reporting for a day's entries.

use crate::models::interval::Interval;
use crate::models::worklog::WorklogEntry;

/// Count overlapping pairs among `intervals`.
///
/// Sorted by (start, end); for each interval every following one that starts
/// before it ends is counted, and the inner scan stops at the first that
/// does not: with starts ascending, nothing after it can overlap either.
/// Used for before/after reporting only.
pub fn count_interval_overlaps(intervals: &[Interval]) -> usize {
    let mut sorted = intervals.to_vec();
    sorted.sort_by_key(|iv| (iv.start, iv.end));

    let mut count = 0;
    for (i, a) in sorted.iter().enumerate() {
        for b in &sorted[i + 1..] {
            if b.start < a.end {
                count += 1;
            } else {
                break;
            }
        }
    }
    count
}

pub fn count_overlaps(entries: &[WorklogEntry]) -> usize {
    let intervals: Vec<Interval> = entries.iter().map(WorklogEntry::interval).collect();
    count_interval_overlaps(&intervals)
}
