//! Error types shared by the scheduling engine and its collaborators.

use chrono::NaiveDate;
use thiserror::Error;

/// Failures raised locally by the grid, layout and drag components.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// A trip whose end date precedes its start date
    #[error("Trip {trip_id:?} ends ({end}) before it starts ({start})")]
    InvalidRange {
        trip_id: Option<i64>,
        start: NaiveDate,
        end: NaiveDate,
    },
    /// No trip with the given id in the supplied snapshot
    #[error("Trip with id {id} not found")]
    TripNotFound { id: i64 },
    /// Column width must be a finite, positive pixel count
    #[error("Invalid column width: {0}px")]
    InvalidColumnWidth(f64),
    /// Pointer delta is NaN or infinite
    #[error("Invalid drag delta: {0}px")]
    InvalidDragDelta(f64),
    /// Moving a trip would push one of its ends past the supported calendar
    #[error("Moving trip {trip_id} by {day_delta} days leaves the supported date range")]
    DateOutOfRange { trip_id: i64, day_delta: i64 },
    /// Window would run past the supported calendar
    #[error("A {length}-day window from {anchor} leaves the supported date range")]
    WindowOutOfRange { anchor: NaiveDate, length: u32 },
    /// Drag handle was never issued or has already ended
    #[error("Unknown drag handle {0}")]
    UnknownDragHandle(u64),
    /// Display colour is not `#RGB` or `#RRGGBB`
    #[error("Color must be in hex format (#RRGGBB or #RGB), got '{0}'")]
    InvalidColor(String),
    /// Destination name is blank
    #[error("Trip destination cannot be empty")]
    EmptyDestination,
}

/// Failures from the destination search collaborator.
///
/// Always surfaced to the host as an empty result set plus this error; the
/// search controller stays usable for later queries.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Destination lookup failed: {0}")]
    Backend(String),
    #[error("Destination lookup database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Destination search was shut down")]
    Cancelled,
}

/// Failures from the trip persistence collaborator.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Trip with id {id} not found")]
    NotFound { id: i64 },
    #[error("Invalid trip: {0}")]
    InvalidTrip(#[from] ScheduleError),
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
    #[error("Trip database error: {0}")]
    Database(#[from] rusqlite::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_range_message_names_dates() {
        let err = ScheduleError::InvalidRange {
            trip_id: Some(7),
            start: NaiveDate::from_ymd_opt(2024, 6, 7).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Trip Some(7) ends (2024-06-05) before it starts (2024-06-07)"
        );
    }

    #[test]
    fn test_schedule_error_converts_into_persistence_error() {
        let err: PersistenceError = ScheduleError::EmptyDestination.into();
        assert!(matches!(
            err,
            PersistenceError::InvalidTrip(ScheduleError::EmptyDestination)
        ));
    }
}
