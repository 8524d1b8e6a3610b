pub mod day_batch;
pub mod interval;
pub mod line_item;
pub mod name_tuple;
pub mod worklog;
