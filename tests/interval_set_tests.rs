mod common;
use common::dt;
use rworklog::core::interval_set::{IntervalSet, merge};
use rworklog::models::interval::Interval;

fn iv(start: &str, end: &str) -> Interval {
    Interval::new(dt("2025-03-03", start), dt("2025-03-03", end))
}

#[test]
fn test_touching_intervals_coalesce() {
    let merged = merge(&[iv("09:00", "10:00")], iv("10:00", "11:00"));
    assert_eq!(merged, vec![iv("09:00", "11:00")]);
}

#[test]
fn test_overlapping_intervals_take_widest_span() {
    let existing = vec![iv("09:00", "10:30"), iv("12:00", "13:00")];
    let merged = merge(&existing, iv("10:00", "12:15"));
    assert_eq!(merged, vec![iv("09:00", "13:00")]);
}

#[test]
fn test_degenerate_interval_is_ignored() {
    let existing = vec![iv("09:00", "10:00")];
    assert_eq!(merge(&existing, iv("11:00", "11:00")), existing);
    assert_eq!(merge(&existing, iv("12:00", "11:00")), existing);
}

#[test]
fn test_result_is_sorted_and_disjoint() {
    let set: IntervalSet = [
        iv("14:00", "15:00"),
        iv("08:00", "09:00"),
        iv("11:00", "12:00"),
        iv("08:30", "08:45"),
    ]
    .into_iter()
    .collect();

    assert_eq!(
        set.as_slice(),
        &[iv("08:00", "09:00"), iv("11:00", "12:00"), iv("14:00", "15:00")]
    );
    for pair in set.as_slice().windows(2) {
        assert!(pair[0].end < pair[1].start);
    }
}

#[test]
fn test_merged_leaves_original_untouched() {
    let mut set = IntervalSet::new();
    set.insert(iv("09:00", "10:00"));

    let bigger = set.merged(iv("13:00", "14:00"));

    assert_eq!(set.len(), 1);
    assert_eq!(bigger.len(), 2);
    assert!(!bigger.is_empty());
}
