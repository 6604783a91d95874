// Trip module
// Immutable trip snapshots placed on the calendar grid

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PersistenceError, ScheduleError};
use crate::utils::date::{add_days, days_between, parse_iso_date};

/// Display colour used when a trip is stored without one (slate-400).
pub const DEFAULT_TRIP_COLOR: &str = "#94a3b8";

/// A persisted trip.
///
/// Both `start_date` and `end_date` are inclusive: a trip from the 5th to the
/// 7th occupies three grid cells. Values are never mutated in place by the
/// engine; rescheduling produces a new candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: i64,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub color: String,
}

impl Trip {
    /// Create a trip snapshot with the default colour.
    ///
    /// # Examples
    /// ```
    /// use travel_calendar::models::trip::Trip;
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
    /// let end = NaiveDate::from_ymd_opt(2024, 6, 7).unwrap();
    /// let trip = Trip::new(1, "Hanoi, Vietnam", start, end).unwrap();
    /// assert_eq!(trip.duration_days(), 3);
    /// ```
    pub fn new(
        id: i64,
        destination: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, ScheduleError> {
        let trip = Self {
            id,
            destination: destination.into(),
            start_date,
            end_date,
            color: DEFAULT_TRIP_COLOR.to_string(),
        };
        trip.validate()?;
        Ok(trip)
    }

    /// Replace the display colour, validating its format.
    pub fn with_color(mut self, color: impl Into<String>) -> Result<Self, ScheduleError> {
        let color = color.into();
        validate_color(&color)?;
        self.color = color;
        Ok(self)
    }

    /// Full validation: destination, date order and colour format.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.destination.trim().is_empty() {
            return Err(ScheduleError::EmptyDestination);
        }
        self.validate_range()?;
        validate_color(&self.color)
    }

    /// Only the date-order check; this is all the layout engine relies on.
    pub fn validate_range(&self) -> Result<(), ScheduleError> {
        check_range(Some(self.id), self.start_date, self.end_date)
    }

    /// Number of calendar days covered, counting both endpoints.
    pub fn duration_days(&self) -> i64 {
        days_between(self.start_date, self.end_date) + 1
    }

    /// True when `date` falls inside `[start_date, end_date]`.
    pub fn occupies(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// A copy of this trip translated by `days`, keeping its duration.
    ///
    /// Fails rather than clamping when either end would leave chrono's range.
    pub fn shifted(&self, days: i64) -> Result<Trip, ScheduleError> {
        let out_of_range = || ScheduleError::DateOutOfRange {
            trip_id: self.id,
            day_delta: days,
        };
        Ok(Trip {
            start_date: add_days(self.start_date, days).ok_or_else(out_of_range)?,
            end_date: add_days(self.end_date, days).ok_or_else(out_of_range)?,
            ..self.clone()
        })
    }

    /// Parse and validate a trip received from the persistence collaborator.
    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        let payload: TripPayload = serde_json::from_str(json)
            .map_err(|e| PersistenceError::InvalidPayload(e.to_string()))?;
        Trip::try_from(payload)
    }
}

/// A trip that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrip {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub color: Option<String>,
}

impl NewTrip {
    pub fn new(
        destination: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, ScheduleError> {
        let draft = Self {
            destination: destination.into(),
            start_date,
            end_date,
            color: None,
        };
        draft.validate()?;
        Ok(draft)
    }

    /// Draft created by picking a destination on a single grid cell.
    pub fn on_date(destination: impl Into<String>, date: NaiveDate) -> Result<Self, ScheduleError> {
        Self::new(destination, date, date)
    }

    pub fn color(mut self, color: impl Into<String>) -> Result<Self, ScheduleError> {
        let color = color.into();
        validate_color(&color)?;
        self.color = Some(color);
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.destination.trim().is_empty() {
            return Err(ScheduleError::EmptyDestination);
        }
        check_range(None, self.start_date, self.end_date)?;
        match self.color {
            Some(ref color) => validate_color(color),
            None => Ok(()),
        }
    }

    /// Colour to store, falling back to [`DEFAULT_TRIP_COLOR`].
    pub fn resolved_color(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_TRIP_COLOR)
    }

    /// Attach the identity assigned by the store.
    pub fn into_trip(self, id: i64) -> Trip {
        let color = self.resolved_color().to_string();
        Trip {
            id,
            destination: self.destination,
            start_date: self.start_date,
            end_date: self.end_date,
            color,
        }
    }
}

/// Wire shape of a trip as exchanged with the persistence collaborator.
///
/// Dates arrive as strings and are only trusted after conversion.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPayload {
    pub id: Option<i64>,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub color: Option<String>,
}

impl TripPayload {
    fn dates(&self) -> Result<(NaiveDate, NaiveDate), PersistenceError> {
        let start = parse_iso_date(&self.start_date).ok_or_else(|| {
            PersistenceError::InvalidPayload(format!("bad startDate '{}'", self.start_date))
        })?;
        let end = parse_iso_date(&self.end_date).ok_or_else(|| {
            PersistenceError::InvalidPayload(format!("bad endDate '{}'", self.end_date))
        })?;
        Ok((start, end))
    }
}

impl TryFrom<TripPayload> for Trip {
    type Error = PersistenceError;

    fn try_from(payload: TripPayload) -> Result<Self, Self::Error> {
        let id = payload
            .id
            .ok_or_else(|| PersistenceError::InvalidPayload("missing trip id".to_string()))?;
        let (start_date, end_date) = payload.dates()?;
        let trip = Trip {
            id,
            destination: payload.destination,
            start_date,
            end_date,
            color: payload
                .color
                .unwrap_or_else(|| DEFAULT_TRIP_COLOR.to_string()),
        };
        trip.validate()?;
        Ok(trip)
    }
}

impl TryFrom<TripPayload> for NewTrip {
    type Error = PersistenceError;

    fn try_from(payload: TripPayload) -> Result<Self, Self::Error> {
        let (start_date, end_date) = payload.dates()?;
        let draft = NewTrip {
            destination: payload.destination,
            start_date,
            end_date,
            color: payload.color,
        };
        draft.validate()?;
        Ok(draft)
    }
}

fn check_range(
    trip_id: Option<i64>,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<(), ScheduleError> {
    if end < start {
        return Err(ScheduleError::InvalidRange { trip_id, start, end });
    }
    Ok(())
}

pub(crate) fn validate_color(color: &str) -> Result<(), ScheduleError> {
    let hex = color.strip_prefix('#').unwrap_or("");
    let valid = (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(ScheduleError::InvalidColor(color.to_string()));
    }
    Ok(())
}
