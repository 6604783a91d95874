//! Date grid: the contiguous run of calendar days rendered by the host,
//! and which trips sit under each day cell.

use chrono::NaiveDate;

use crate::error::ScheduleError;
use crate::models::trip::Trip;
use crate::utils::date::{add_days, days_between};

/// Days shown by default (four rows of seven).
pub const DEFAULT_WINDOW_LENGTH: u32 = 28;

const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Visible window of the calendar grid. Derived from the anchor date and
/// never persisted.
///
/// Every day of a window is a representable date, so the window can always
/// be enumerated without gaps or repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridWindow {
    anchor: NaiveDate,
    length: u32,
}

impl GridWindow {
    pub fn new(anchor: NaiveDate, length: u32) -> Result<Self, ScheduleError> {
        if length > 0 && add_days(anchor, i64::from(length) - 1).is_none() {
            return Err(ScheduleError::WindowOutOfRange { anchor, length });
        }
        Ok(Self { anchor, length })
    }

    /// 28-day window starting at `anchor`.
    pub fn default_at(anchor: NaiveDate) -> Result<Self, ScheduleError> {
        Self::new(anchor, DEFAULT_WINDOW_LENGTH)
    }

    /// First visible date.
    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    /// Last visible date, or `None` for an empty window.
    pub fn end(&self) -> Option<NaiveDate> {
        self.length
            .checked_sub(1)
            .and_then(|last| add_days(self.anchor, i64::from(last)))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.column_of(date).is_some()
    }

    /// Zero-based column of `date`, if it is visible.
    pub fn column_of(&self, date: NaiveDate) -> Option<usize> {
        let offset = days_between(self.anchor, date);
        (offset >= 0 && offset < i64::from(self.length)).then_some(offset as usize)
    }

    /// Same-length window moved by whole weeks (negative goes back).
    pub fn shifted_weeks(&self, weeks: i64) -> Result<Self, ScheduleError> {
        let anchor = weeks
            .checked_mul(7)
            .and_then(|days| add_days(self.anchor, days))
            .ok_or(ScheduleError::WindowOutOfRange {
                anchor: self.anchor,
                length: self.length,
            })?;
        Self::new(anchor, self.length)
    }
}

/// Every date in the window, ascending, without gaps.
pub fn dates_in_window(window: &GridWindow) -> Vec<NaiveDate> {
    // chrono's `iter_days` stops short of `NaiveDate::MAX`
    (0..i64::from(window.length))
        .map_while(|offset| add_days(window.anchor, offset))
        .collect()
}

/// True when `date` lies within the trip's inclusive range.
pub fn occupies_date(trip: &Trip, date: NaiveDate) -> bool {
    trip.occupies(date)
}

/// Trips that render under the cell for `date`.
pub fn trips_for_date<'a>(trips: &'a [Trip], date: NaiveDate) -> Vec<&'a Trip> {
    trips.iter().filter(|trip| trip.occupies(date)).collect()
}

/// Column headers for the seven-wide grid.
pub fn weekday_headers() -> [&'static str; 7] {
    WEEKDAY_HEADERS
}
