//! Unified application error type.
//! All modules (db, core, remote, cli, utils) return AppError to keep the
//! error handling consistent and easy to manage.

use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;
use std::io;
use thiserror::Error;

/// Identifier of the worklog an error refers to (unset before persistence).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryRef(pub Option<i64>);

impl fmt::Display for EntryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(id) => write!(f, "#{}", id),
            None => write!(f, "(unsaved)"),
        }
    }
}

/// Invariant a worklog entry violates when it is prepared for submission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("{0} name is blank")]
    BlankName(&'static str),

    #[error("no identifiers resolved for {0}")]
    Unresolved(String),

    #[error("resolved {field} id {value} is not positive")]
    NonPositiveId { field: &'static str, value: i64 },

    #[error("start {start} and end {end} are on different days")]
    CrossDay {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("duration of {0} minutes is not positive")]
    NonPositiveDuration(i64),

    #[error("billable minutes {0} is negative")]
    NegativeBillable(i64),
}

/// Why a name could not be turned into a remote identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveFailure {
    #[error("{kind} '{name}' not found")]
    Unmatched { kind: &'static str, name: String },

    #[error("{kind} '{name}' matches {count} remote records")]
    Ambiguous {
        kind: &'static str,
        name: String,
        count: usize,
    },

    #[error("{kind} '{name}' is archived")]
    Archived { kind: &'static str, name: String },

    #[error("{kind} '{name}' is locked")]
    Locked { kind: &'static str, name: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Worklog {0} not found")]
    NotFound(i64),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    // ---------------------------
    // Worklog validation / resolution
    // ---------------------------
    #[error("Invalid worklog {entry}: {violation}")]
    Validation { entry: EntryRef, violation: Violation },

    #[error("Cannot resolve identifiers for worklog {entry} ({tuple}): {reason}")]
    Resolution {
        entry: EntryRef,
        tuple: String,
        reason: ResolveFailure,
    },

    // ---------------------------
    // Remote API
    // ---------------------------
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Remote API returned status {status} for {url}")]
    RemoteStatus { status: u16, url: String },

    // ---------------------------
    // Run control
    // ---------------------------
    #[error("Submission aborted by user while resolving overlaps for {0}")]
    UserAbort(NaiveDate),

    #[error("Submission cancelled before {0}")]
    Cancelled(NaiveDate),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    pub fn validation(id: Option<i64>, violation: Violation) -> Self {
        AppError::Validation {
            entry: EntryRef(id),
            violation,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
