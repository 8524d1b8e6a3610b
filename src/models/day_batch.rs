use super::line_item::RemoteLineItem;
use chrono::NaiveDate;
use serde::Serialize;

/// Local entries of one calendar day, converted for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayBatch {
    pub day: NaiveDate,
    pub items: Vec<RemoteLineItem>,
}

impl DayBatch {
    pub fn label(&self) -> String {
        self.day.format("%a %Y-%m-%d").to_string()
    }
}

/// A local candidate whose range intersects an existing remote item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlapPair {
    pub local: RemoteLineItem,
    pub remote: RemoteLineItem,
}
