//! Homework records and their review statuses.

mod status;

pub use status::{HomeworkStatus, parse_status};
