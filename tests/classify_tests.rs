mod common;
use common::remote_item;
use rworklog::core::classify::classify;

const D: &str = "2025-03-03";

#[test]
fn test_overlap_with_different_project_is_held_back() {
    let local = remote_item(-1, D, "09:00", "10:00");
    let mut remote = remote_item(501, D, "09:30", "10:30");
    remote.project_id = 5;

    let c = classify(&[local.clone()], &[remote.clone()]);

    assert_eq!(c.duplicates, 0);
    assert!(c.to_add.is_empty());
    assert_eq!(c.overlaps.len(), 1);
    assert_eq!(c.overlaps[0].local, local);
    assert_eq!(c.overlaps[0].remote, remote);
}

#[test]
fn test_equivalence_ignores_comment_and_billable() {
    let mut local = remote_item(-1, D, "09:00", "10:00");
    local.comment = "fixed the build".into();
    local.billable_minutes = 0;
    local.valuable = false;

    let mut remote = remote_item(501, D, "09:00", "10:00");
    remote.comment = "something else entirely".into();
    remote.billable_minutes = 60;

    let c = classify(&[local], &[remote]);

    assert_eq!(c.duplicates, 1);
    assert!(c.overlaps.is_empty());
    assert!(c.to_add.is_empty());
}

#[test]
fn test_duplicate_wins_over_earlier_overlap() {
    let local = remote_item(-1, D, "09:00", "10:00");
    let mut overlapping = remote_item(501, D, "09:30", "10:30");
    overlapping.project_id = 9;
    let equivalent = remote_item(502, D, "09:00", "10:00");

    let c = classify(&[local], &[overlapping, equivalent]);

    assert_eq!(c.duplicates, 1);
    assert!(c.overlaps.is_empty());
}

#[test]
fn test_first_overlapping_remote_item_is_the_only_one_reported() {
    let local = remote_item(-1, D, "09:00", "12:00");
    let mut r1 = remote_item(501, D, "09:30", "10:00");
    r1.skill_id = 8;
    let mut r2 = remote_item(502, D, "11:00", "11:30");
    r2.skill_id = 8;

    let c = classify(&[local], &[r1, r2]);

    assert_eq!(c.overlaps.len(), 1);
    assert_eq!(c.overlaps[0].remote.id, 501);
}

#[test]
fn test_touching_and_unbounded_items_are_new() {
    let touching = remote_item(-1, D, "10:00", "11:00");
    let elsewhere = remote_item(-2, D, "14:00", "15:00");

    let before = remote_item(501, D, "09:00", "10:00");
    let mut unbounded = remote_item(502, D, "14:00", "15:00");
    unbounded.project_id = 4;
    unbounded.start_minutes = None;

    let c = classify(&[touching.clone(), elsewhere.clone()], &[before, unbounded]);

    assert_eq!(c.to_add, vec![touching, elsewhere]);
    assert_eq!(c.duplicates, 0);
    assert!(c.overlaps.is_empty());
}

#[test]
fn test_empty_remote_day_accepts_everything() {
    let locals = vec![
        remote_item(-1, D, "08:00", "09:00"),
        remote_item(-2, D, "09:00", "10:00"),
    ];
    let c = classify(&locals, &[]);
    assert_eq!(c.to_add, locals);
}
