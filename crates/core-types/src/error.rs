use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Unknown dashboard tab: '{0}'")]
    UnknownTab(String),
}
