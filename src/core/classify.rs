//! Splits a day's local candidates into duplicates, overlaps and new items
//! against what the remote day already holds. Read-only on both sides.

use crate::models::day_batch::OverlapPair;
use crate::models::line_item::RemoteLineItem;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub to_add: Vec<RemoteLineItem>,
    pub overlaps: Vec<OverlapPair>,
    pub duplicates: usize,
}

/// Each candidate is matched against `existing` in order:
/// 1. first equivalent remote item → duplicate, dropped;
/// 2. else first overlapping remote item → one `OverlapPair`, held back;
/// 3. else new.
///
/// A candidate is paired with one remote item at most, even when it
/// intersects several.
pub fn classify(candidates: &[RemoteLineItem], existing: &[RemoteLineItem]) -> Classification {
    let mut out = Classification::default();

    for candidate in candidates {
        if existing.iter().any(|r| candidate.is_equivalent(r)) {
            out.duplicates += 1;
            continue;
        }

        if let Some(remote) = existing.iter().find(|r| candidate.overlaps(r)) {
            out.overlaps.push(OverlapPair {
                local: candidate.clone(),
                remote: remote.clone(),
            });
            continue;
        }

        out.to_add.push(candidate.clone());
    }

    out
}
