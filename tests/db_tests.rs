mod common;
use common::{FakeApi, adjustable, day, dt, entry};
use rworklog::config::{Config, ReconcileConfig};
use rworklog::core::add::AddLogic;
use rworklog::core::del::DeleteLogic;
use rworklog::core::reconcile::{Adjustment, ReconcileLogic};
use rworklog::core::submit::{FixedChoice, OverlapChoice, SubmitLogic, SubmitOptions};
use rworklog::db::log::load_log;
use rworklog::db::migrate::run_pending_migrations;
use rworklog::db::pool::DbPool;
use rworklog::db::queries::{
    insert_worklog, load_all_worklogs, load_worklog, load_worklogs_between, update_worklog_times,
};
use rworklog::errors::AppError;

const D: &str = "2025-03-03";

fn pool() -> DbPool {
    DbPool::in_memory().expect("in-memory ledger")
}

fn log_ops(pool: &DbPool, operation: &str) -> Vec<(String, String)> {
    load_log(&pool.conn)
        .expect("log rows")
        .into_iter()
        .filter(|(_, _, op, _, _)| op == operation)
        .map(|(_, _, _, target, message)| (target, message))
        .collect()
}

#[test]
fn test_insert_and_load_keep_every_field() {
    let pool = pool();
    let mut e = adjustable(0, D, "09:00", "10:30");
    e.id = None;
    e.description = "sprint planning".into();
    e.billable_minutes = 60;

    let id = insert_worklog(&pool.conn, &e).expect("insert");
    let loaded = load_worklog(&pool, id).expect("query").expect("row");

    assert_eq!(loaded.id, Some(id));
    assert_eq!(loaded.start, e.start);
    assert_eq!(loaded.end, e.end);
    assert_eq!(loaded.billable_minutes, 60);
    assert_eq!(loaded.description, "sprint planning");
    assert_eq!(loaded.source_format, "csv");
    assert_eq!(loaded.source_mapper, "daily_totals");
    assert_eq!(loaded.source_file, "totals_2025.csv");
}

#[test]
fn test_loads_are_ordered_and_bounded_by_day() {
    let pool = pool();
    for e in [
        entry(0, "2025-03-04", "08:00", "09:00"),
        entry(0, D, "14:00", "15:00"),
        entry(0, D, "09:00", "10:00"),
        entry(0, "2025-03-05", "23:00", "23:30"),
    ] {
        insert_worklog(&pool.conn, &e).expect("insert");
    }

    let all = load_all_worklogs(&pool).expect("all");
    let starts: Vec<_> = all.iter().map(|e| e.start).collect();
    assert_eq!(
        starts,
        vec![
            dt(D, "09:00"),
            dt(D, "14:00"),
            dt("2025-03-04", "08:00"),
            dt("2025-03-05", "23:00"),
        ]
    );

    let first_two = load_worklogs_between(&pool, day(D), day("2025-03-04")).expect("range");
    assert_eq!(first_two.len(), 3);

    let last = load_worklogs_between(&pool, day("2025-03-05"), day("2025-03-05")).expect("day");
    assert_eq!(last.len(), 1);
}

#[test]
fn test_time_updates_touch_only_changed_rows() {
    let mut pool = pool();
    let mut e = adjustable(0, D, "09:00", "10:00");
    e.id = None;
    e.description = "kept".into();
    let id = insert_worklog(&pool.conn, &e).expect("insert");

    let moves = vec![
        Adjustment {
            id: Some(id),
            start: dt(D, "10:00"),
            end: dt(D, "11:00"),
        },
        Adjustment {
            id: None,
            start: dt(D, "12:00"),
            end: dt(D, "13:00"),
        },
    ];

    assert_eq!(update_worklog_times(&mut pool, &moves).expect("update"), 1);
    assert_eq!(update_worklog_times(&mut pool, &moves).expect("update"), 0);

    let loaded = load_worklog(&pool, id).expect("query").expect("row");
    assert_eq!(loaded.start, dt(D, "10:00"));
    assert_eq!(loaded.end, dt(D, "11:00"));
    assert_eq!(loaded.description, "kept");
    assert_eq!(loaded.billable_minutes, 60);
}

#[test]
fn test_migrations_are_recorded_once() {
    let pool = pool();
    run_pending_migrations(&pool.conn).expect("second run");
    run_pending_migrations(&pool.conn).expect("third run");

    assert_eq!(log_ops(&pool, "migration_applied").len(), 1);
}

#[test]
fn test_reconcile_writes_back_and_logs_the_day() {
    let mut pool = pool();
    for e in [
        entry(0, D, "09:00", "11:00"),
        adjustable(0, D, "09:00", "11:00"),
        adjustable(0, D, "09:00", "11:00"),
    ] {
        insert_worklog(&pool.conn, &e).expect("insert");
    }

    let outcome = ReconcileLogic::apply(&mut pool, &ReconcileConfig::default(), None, false, "-")
        .expect("reconcile");
    assert_eq!(outcome.adjusted_count(), 2);

    let after = load_all_worklogs(&pool).expect("all");
    let slots: Vec<_> = after.iter().map(|e| (e.start, e.end)).collect();
    assert_eq!(
        slots,
        vec![
            (dt(D, "09:00"), dt(D, "11:00")),
            (dt(D, "11:00"), dt(D, "13:00")),
            (dt(D, "13:00"), dt(D, "15:00")),
        ]
    );

    let logged = log_ops(&pool, "reconcile");
    assert_eq!(logged.len(), 1);
    assert_eq!(logged[0].0, D);
    assert!(logged[0].1.starts_with("2 entries moved"));
}

#[test]
fn test_reconcile_dry_run_writes_nothing() {
    let mut pool = pool();
    insert_worklog(&pool.conn, &entry(0, D, "09:00", "10:00")).expect("insert");
    insert_worklog(&pool.conn, &adjustable(0, D, "09:30", "10:00")).expect("insert");

    let outcome = ReconcileLogic::apply(&mut pool, &ReconcileConfig::default(), None, true, "-")
        .expect("reconcile");
    assert_eq!(outcome.adjusted_count(), 1);

    let after = load_all_worklogs(&pool).expect("all");
    assert_eq!(after[1].start, dt(D, "09:30"));
    assert!(log_ops(&pool, "reconcile").is_empty());
}

#[test]
fn test_submit_logs_each_persisted_day() {
    let pool = pool();
    insert_worklog(&pool.conn, &entry(0, D, "09:00", "10:00")).expect("insert");
    insert_worklog(&pool.conn, &entry(0, "2025-03-04", "09:00", "10:00")).expect("insert");

    let api = FakeApi::new();
    let summary = SubmitLogic::run(
        &pool,
        &Config::default(),
        &api,
        &mut FixedChoice(OverlapChoice::Abort),
        None,
        SubmitOptions::default(),
    )
    .expect("submit");

    assert_eq!(summary.entries_submitted, 2);
    assert_eq!(api.persist_count(), 2);

    let logged = log_ops(&pool, "submit");
    let targets: Vec<_> = logged.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(targets, vec![D, "2025-03-04"]);
}

#[test]
fn test_submit_failure_still_logs_earlier_days() {
    let pool = pool();
    insert_worklog(&pool.conn, &entry(0, D, "09:00", "10:00")).expect("insert");
    insert_worklog(&pool.conn, &entry(0, "2025-03-04", "09:00", "10:00")).expect("insert");

    let api = FakeApi {
        fail_on: Some(day("2025-03-04")),
        ..FakeApi::new()
    };
    let result = SubmitLogic::run(
        &pool,
        &Config::default(),
        &api,
        &mut FixedChoice(OverlapChoice::Abort),
        None,
        SubmitOptions::default(),
    );

    assert!(matches!(result, Err(AppError::RemoteStatus { .. })));
    assert_eq!(log_ops(&pool, "submit").len(), 1);
}

#[test]
fn test_submit_with_empty_period_does_nothing() {
    let pool = pool();
    let api = FakeApi::new();
    let summary = SubmitLogic::run(
        &pool,
        &Config::default(),
        &api,
        &mut FixedChoice(OverlapChoice::Abort),
        Some((day(D), day(D))),
        SubmitOptions {
            dry_run: true,
            cancel: None,
        },
    )
    .expect("submit");

    assert!(summary.dry_run);
    assert_eq!(summary.local_entries_prepared, 0);
    assert_eq!(api.lookup_calls.get(), 0);
}

#[test]
fn test_add_rejects_backwards_entry_and_logs_valid_one() {
    let mut pool = pool();

    let backwards = entry(0, D, "10:00", "09:00");
    let err = AddLogic::apply(&mut pool, &backwards).expect_err("rejected");
    assert!(matches!(err, AppError::Validation { .. }));
    assert!(load_all_worklogs(&pool).expect("all").is_empty());

    let id = AddLogic::apply(&mut pool, &entry(0, D, "09:00", "10:00")).expect("added");
    let logged = log_ops(&pool, "add");
    assert_eq!(logged.len(), 1);
    assert_eq!(logged[0].0, format!("#{id}"));
}

#[test]
fn test_delete_missing_and_existing() {
    let mut pool = pool();

    assert!(matches!(
        DeleteLogic::apply(&mut pool, 42),
        Err(AppError::NotFound(42))
    ));

    let id = insert_worklog(&pool.conn, &entry(0, D, "09:00", "10:00")).expect("insert");
    let removed = DeleteLogic::apply(&mut pool, id).expect("deleted");
    assert_eq!(removed.project, "Apollo");
    assert!(load_worklog(&pool, id).expect("query").is_none());
    assert_eq!(log_ops(&pool, "del").len(), 1);
}
