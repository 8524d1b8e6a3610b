//! Remote day-scoped worklog API.
//!
//! The submission engine only talks to [`WorklogApi`]; [`http::HttpWorklogApi`]
//! is the JSON-over-HTTP implementation used by the CLI.

pub mod http;

use crate::errors::AppResult;
use crate::models::line_item::{LookupSnapshot, PersistAck, RemoteLineItem};
use chrono::NaiveDate;

pub trait WorklogApi {
    /// Every line item the remote system holds for `day`, locked ones included.
    fn fetch_day(&self, day: NaiveDate) -> AppResult<Vec<RemoteLineItem>>;

    /// Replace the whole content of `day` with `items`.
    /// Returns one acknowledgement per submitted item.
    fn persist_day(&self, day: NaiveDate, items: &[RemoteLineItem]) -> AppResult<Vec<PersistAck>>;

    /// Projects, activities and skills known to the remote system.
    fn fetch_lookups(&self) -> AppResult<LookupSnapshot>;
}

impl<T: WorklogApi + ?Sized> WorklogApi for &T {
    fn fetch_day(&self, day: NaiveDate) -> AppResult<Vec<RemoteLineItem>> {
        (**self).fetch_day(day)
    }

    fn persist_day(&self, day: NaiveDate, items: &[RemoteLineItem]) -> AppResult<Vec<PersistAck>> {
        (**self).persist_day(day, items)
    }

    fn fetch_lookups(&self) -> AppResult<LookupSnapshot> {
        (**self).fetch_lookups()
    }
}
