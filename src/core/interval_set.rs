//! Sorted, non-overlapping set of busy time ranges.

use crate::models::interval::Interval;

/// Merge `new` into `existing` and return the normalized result: sorted by
/// start, overlapping or touching ranges coalesced into the widest span.
/// Degenerate intervals are ignored. `existing` is never modified.
pub fn merge(existing: &[Interval], new: Interval) -> Vec<Interval> {
    if new.is_degenerate() {
        return existing.to_vec();
    }

    let mut all: Vec<Interval> = existing
        .iter()
        .copied()
        .filter(|iv| !iv.is_degenerate())
        .chain(std::iter::once(new))
        .collect();
    all.sort_by_key(|iv| (iv.start, iv.end));

    let mut out: Vec<Interval> = Vec::with_capacity(all.len());
    for iv in all {
        match out.last_mut() {
            Some(last) if iv.start <= last.end => {
                if iv.end > last.end {
                    last.end = iv.end;
                }
            }
            _ => out.push(iv),
        }
    }
    out
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntervalSet {
    intervals: Vec<Interval>,
}

impl IntervalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure variant: returns a new set, `self` is untouched.
    pub fn merged(&self, iv: Interval) -> IntervalSet {
        IntervalSet {
            intervals: merge(&self.intervals, iv),
        }
    }

    pub fn insert(&mut self, iv: Interval) {
        self.intervals = merge(&self.intervals, iv);
    }

    pub fn as_slice(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}

impl FromIterator<Interval> for IntervalSet {
    fn from_iter<I: IntoIterator<Item = Interval>>(iter: I) -> Self {
        let mut set = IntervalSet::new();
        for iv in iter {
            set.insert(iv);
        }
        set
    }
}
