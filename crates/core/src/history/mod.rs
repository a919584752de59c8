pub mod calendar;
pub mod granularity;
pub mod panel;

pub use granularity::Granularity;
pub use panel::{Bar, ClickOutcome, HistoryPanel, HistorySnapshot, SessionRecord};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("bar {index} out of range ({len} bars)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("year {0} outside 2000..=2100")]
    YearOutOfRange(i32),
    #[error("invalid month {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },
    #[error("invalid ISO week {year}-W{week:02}")]
    InvalidWeek { year: i32, week: u32 },
    #[error("invalid date `{0}`")]
    InvalidDate(String),
    #[error("date arithmetic out of range")]
    DateOutOfRange,
    #[error("unknown granularity `{0}`")]
    UnknownGranularity(String),
}
