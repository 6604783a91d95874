// Date utility functions
// All arithmetic is on date-only values, so daylight-saving shifts never move a day.

use chrono::{Days, NaiveDate};

/// Adds a signed number of calendar days.
///
/// Returns `None` when the result falls outside chrono's date range.
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

/// Signed number of calendar days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Parses an ISO `YYYY-MM-DD` date, also accepting a trailing time part
/// (`2024-06-05T00:00:00.000Z`) as sent by browser clients.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    let date_part = trimmed.split('T').next().unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
