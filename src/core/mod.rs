//! Shared utilities.

mod datetime;

pub use datetime::parse_day;
