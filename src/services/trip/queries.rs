use super::TripService;
use crate::error::PersistenceError;
use crate::models::trip::Trip;
use crate::services::grid::GridWindow;
use rusqlite::{self, Row};

impl<'a> TripService<'a> {
    /// Every trip, ordered by start date then id.
    pub fn list_all(&self) -> Result<Vec<Trip>, PersistenceError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, destination, start_date, end_date, color
             FROM trips
             ORDER BY start_date ASC, id ASC",
        )?;

        let trips = stmt
            .query_map([], map_trip_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(trips)
    }

    /// Trips that overlap any day of `window`.
    pub fn find_in_window(&self, window: &GridWindow) -> Result<Vec<Trip>, PersistenceError> {
        let Some(window_end) = window.end() else {
            return Ok(Vec::new());
        };

        let mut stmt = self.conn.prepare(
            "SELECT id, destination, start_date, end_date, color
             FROM trips
             WHERE start_date <= ?2 AND end_date >= ?1
             ORDER BY start_date ASC, id ASC",
        )?;

        let trips = stmt
            .query_map(rusqlite::params![window.anchor(), window_end], map_trip_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(trips)
    }
}

pub(crate) fn map_trip_row(row: &Row) -> rusqlite::Result<Trip> {
    Ok(Trip {
        id: row.get(0)?,
        destination: row.get(1)?,
        start_date: row.get(2)?,
        end_date: row.get(3)?,
        color: row.get(4)?,
    })
}
