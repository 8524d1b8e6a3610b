use chrono::{NaiveDateTime, TimeDelta};
use serde::Serialize;

/// Half-open time range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Interval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Interval {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// `end <= start`: such intervals carry no busy time.
    pub fn is_degenerate(&self) -> bool {
        self.end <= self.start
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Strict intersection; touching ranges do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}
