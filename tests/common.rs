#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime};
use rworklog::core::submit::{OverlapChoice, OverlapPrompter};
use rworklog::errors::{AppError, AppResult};
use rworklog::models::day_batch::OverlapPair;
use rworklog::models::line_item::{LookupRecord, LookupSnapshot, PersistAck, RemoteLineItem};
use rworklog::models::worklog::WorklogEntry;
use rworklog::remote::WorklogApi;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::env;
use std::fs;
use std::path::PathBuf;

/// The binary, with HOME pointed at a scratch dir so no user config leaks in.
pub fn rwl() -> Command {
    let mut home = env::temp_dir();
    home.push("rworklog_test_home");
    fs::create_dir_all(&home).ok();

    let mut cmd = cargo_bin_cmd!("rworklog");
    cmd.env("HOME", &home).env_remove("RWORKLOG_API_TOKEN");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rworklog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize DB and add a small dataset useful for many tests
pub fn init_db_with_data(db_path: &str) {
    rwl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    add_via_cli(db_path, "2025-09-01", "09:00", "12:00", &[]);
    add_via_cli(db_path, "2025-09-15", "14:00", "17:30", &[]);
}

pub fn add_via_cli(db_path: &str, date: &str, start: &str, end: &str, extra: &[&str]) {
    let mut args = vec![
        "--db",
        db_path,
        "add",
        date,
        "--start",
        start,
        "--end",
        end,
        "--project",
        "Apollo",
        "--activity",
        "Development",
        "--skill",
        "Rust",
    ];
    args.extend_from_slice(extra);
    rwl().args(&args).assert().success();
}

// ---------------------------------------------------------------------------
// Library-level builders
// ---------------------------------------------------------------------------

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid day")
}

pub fn dt(d: &str, hhmm: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(&format!("{d} {hhmm}"), "%Y-%m-%d %H:%M").expect("valid time")
}

/// Manual entry on `d` with the default names.
pub fn entry(id: i64, d: &str, start: &str, end: &str) -> WorklogEntry {
    let mut e = WorklogEntry::new(dt(d, start), dt(d, end), "Apollo", "Development", "Rust");
    e.id = Some(id);
    e
}

/// Entry imported through the aggregate-only mapper.
pub fn adjustable(id: i64, d: &str, start: &str, end: &str) -> WorklogEntry {
    let mut e = entry(id, d, start, end);
    e.source_format = "csv".into();
    e.source_mapper = "daily_totals".into();
    e.source_file = "totals_2025.csv".into();
    e
}

pub fn minutes(hhmm: &str) -> i64 {
    let (h, m) = hhmm.split_once(':').expect("HH:MM");
    h.parse::<i64>().expect("hours") * 60 + m.parse::<i64>().expect("minutes")
}

/// Remote item on `d`, ids (1, 2, 3) unless changed by the caller.
pub fn remote_item(id: i64, d: &str, start: &str, finish: &str) -> RemoteLineItem {
    let (s, f) = (minutes(start), minutes(finish));
    RemoteLineItem {
        id,
        day: day(d),
        start_minutes: Some(s),
        finish_minutes: Some(f),
        duration_minutes: f - s,
        billable_minutes: f - s,
        valuable: true,
        project_id: 1,
        activity_id: 2,
        skill_id: 3,
        comment: String::new(),
        locked: false,
    }
}

pub fn lookup(id: i64, name: &str) -> LookupRecord {
    LookupRecord {
        id,
        name: name.to_string(),
        archived: false,
        locked: false,
    }
}

/// Snapshot that resolves the default names to (1, 2, 3).
pub fn default_snapshot() -> LookupSnapshot {
    LookupSnapshot {
        projects: vec![lookup(1, "Apollo")],
        activities: vec![lookup(2, "Development")],
        skills: vec![lookup(3, "Rust")],
    }
}

// ---------------------------------------------------------------------------
// In-memory remote
// ---------------------------------------------------------------------------

/// Remote API kept in memory. `persist_day` replaces the day like the real
/// service does and assigns fresh positive ids to placeholders.
#[derive(Default)]
pub struct FakeApi {
    pub days: RefCell<HashMap<NaiveDate, Vec<RemoteLineItem>>>,
    pub snapshot: LookupSnapshot,
    pub fetches: RefCell<Vec<NaiveDate>>,
    pub persists: RefCell<Vec<(NaiveDate, Vec<RemoteLineItem>)>>,
    pub lookup_calls: Cell<usize>,
    /// Fail every call touching this day.
    pub fail_on: Option<NaiveDate>,
    pub next_id: Cell<i64>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            snapshot: default_snapshot(),
            next_id: Cell::new(1000),
            ..Self::default()
        }
    }

    pub fn with_day(self, d: &str, items: Vec<RemoteLineItem>) -> Self {
        self.days.borrow_mut().insert(day(d), items);
        self
    }

    pub fn persist_count(&self) -> usize {
        self.persists.borrow().len()
    }

    pub fn persisted_days(&self) -> Vec<NaiveDate> {
        self.persists.borrow().iter().map(|(d, _)| *d).collect()
    }
}

impl WorklogApi for FakeApi {
    fn fetch_day(&self, d: NaiveDate) -> AppResult<Vec<RemoteLineItem>> {
        if self.fail_on == Some(d) {
            return Err(AppError::RemoteStatus {
                status: 503,
                url: format!("fake://days/{d}/items"),
            });
        }
        self.fetches.borrow_mut().push(d);
        Ok(self.days.borrow().get(&d).cloned().unwrap_or_default())
    }

    fn persist_day(&self, d: NaiveDate, items: &[RemoteLineItem]) -> AppResult<Vec<PersistAck>> {
        self.persists.borrow_mut().push((d, items.to_vec()));

        let mut stored = Vec::with_capacity(items.len());
        let mut acks = Vec::with_capacity(items.len());
        for item in items {
            let mut item = item.clone();
            let temp_id = if item.id < 0 {
                let id = self.next_id.get();
                self.next_id.set(id + 1);
                let temp = item.id;
                item.id = id;
                Some(temp)
            } else {
                None
            };
            acks.push(PersistAck {
                id: item.id,
                temp_id,
            });
            stored.push(item);
        }
        self.days.borrow_mut().insert(d, stored);
        Ok(acks)
    }

    fn fetch_lookups(&self) -> AppResult<LookupSnapshot> {
        self.lookup_calls.set(self.lookup_calls.get() + 1);
        Ok(self.snapshot.clone())
    }
}

// ---------------------------------------------------------------------------
// Scripted operator
// ---------------------------------------------------------------------------

/// Answers overlap prompts from a fixed script and records what it was shown.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<OverlapChoice>,
    pub asked: Vec<(String, usize)>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[OverlapChoice]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            asked: Vec::new(),
        }
    }
}

impl OverlapPrompter for ScriptedPrompter {
    fn choose(&mut self, day_label: &str, overlaps: &[OverlapPair]) -> AppResult<OverlapChoice> {
        self.asked.push((day_label.to_string(), overlaps.len()));
        self.answers
            .pop_front()
            .ok_or_else(|| AppError::Other(format!("unexpected prompt for {day_label}")))
    }
}
