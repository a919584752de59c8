//! Date arithmetic behind the history buckets and drill-down targets.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use super::HistoryError;

pub const MONTH_ABBREVS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn month_start(year: i32, month: u32) -> Result<NaiveDate, HistoryError> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(HistoryError::InvalidMonth { year, month })
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32, HistoryError> {
    let first = month_start(year, month)?;
    let next = if month == 12 {
        month_start(year + 1, 1)?
    } else {
        month_start(year, month + 1)?
    };
    Ok(next.signed_duration_since(first).num_days() as u32)
}

/// Rows a Sunday-first calendar needs to show the month.
pub fn weeks_in_month(year: i32, month: u32) -> Result<u32, HistoryError> {
    let lead = month_start(year, month)?.weekday().num_days_from_sunday();
    let days = days_in_month(year, month)?;
    Ok((days + lead).div_ceil(7))
}

/// Monday on or before `date`.
pub fn monday_of(date: NaiveDate) -> Result<NaiveDate, HistoryError> {
    let back = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(back))
        .ok_or(HistoryError::DateOutOfRange)
}

/// Monday of the `index`-th calendar week of a month, counting the week that
/// contains the 1st as week 0.
pub fn month_week_start(year: i32, month: u32, index: usize) -> Result<NaiveDate, HistoryError> {
    let first_monday = monday_of(month_start(year, month)?)?;
    add_days(first_monday, 7 * index as u64)
}

/// Monday of ISO week `week` of `year`.
pub fn iso_week_start(year: i32, week: u32) -> Result<NaiveDate, HistoryError> {
    NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
        .ok_or(HistoryError::InvalidWeek { year, week })
}

pub fn add_days(date: NaiveDate, days: u64) -> Result<NaiveDate, HistoryError> {
    date.checked_add_days(Days::new(days))
        .ok_or(HistoryError::DateOutOfRange)
}

/// `"Mon 3"` style label for a day inside a week view.
pub fn weekday_label(date: NaiveDate) -> String {
    format!("{} {}", date.format("%a"), date.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 2).ok(), Some(29));
        assert_eq!(days_in_month(2025, 2).ok(), Some(28));
        assert_eq!(days_in_month(2025, 12).ok(), Some(31));
        assert!(days_in_month(2025, 13).is_err());
    }

    #[test]
    fn week_rows() {
        // June 2025 starts on a Sunday: 30 days, no lead → 5 rows.
        assert_eq!(weeks_in_month(2025, 6).ok(), Some(5));
        // March 2025 starts on a Saturday: 31 + 6 → 6 rows.
        assert_eq!(weeks_in_month(2025, 3).ok(), Some(6));
        // February 2015 starts on a Sunday with 28 days → 4 rows.
        assert_eq!(weeks_in_month(2015, 2).ok(), Some(4));
    }

    #[test]
    fn monday_lookup() {
        assert_eq!(monday_of(ymd(2025, 6, 27)).ok(), Some(ymd(2025, 6, 23)));
        assert_eq!(monday_of(ymd(2025, 6, 23)).ok(), Some(ymd(2025, 6, 23)));
        assert_eq!(monday_of(ymd(2025, 6, 1)).ok(), Some(ymd(2025, 5, 26)));
    }

    #[test]
    fn month_week_starts_from_monday_before_first() {
        assert_eq!(month_week_start(2025, 6, 0).ok(), Some(ymd(2025, 5, 26)));
        assert_eq!(month_week_start(2025, 6, 2).ok(), Some(ymd(2025, 6, 9)));
    }

    #[test]
    fn iso_weeks() {
        assert_eq!(iso_week_start(2025, 1).ok(), Some(ymd(2024, 12, 30)));
        assert_eq!(iso_week_start(2025, 27).ok(), Some(ymd(2025, 6, 30)));
        assert!(iso_week_start(2025, 54).is_err());
    }

    #[test]
    fn weekday_labels() {
        assert_eq!(weekday_label(ymd(2025, 6, 23)), "Mon 23");
    }
}
