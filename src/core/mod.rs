pub mod add;
pub mod backup;
pub mod batch;
pub mod classify;
pub mod conflicts;
pub mod del;
pub mod interval_set;
pub mod list;
pub mod log;
pub mod reconcile;
pub mod resolve;
pub mod submit;
