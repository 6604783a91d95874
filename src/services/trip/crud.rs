use super::TripService;
use crate::error::PersistenceError;
use crate::models::trip::{NewTrip, Trip};
use rusqlite::{self, params};

impl<'a> TripService<'a> {
    /// Insert a new trip, assigning its id.
    pub fn create(&self, draft: NewTrip) -> Result<Trip, PersistenceError> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO trips (destination, start_date, end_date, color) VALUES (?1, ?2, ?3, ?4)",
            params![
                draft.destination,
                draft.start_date,
                draft.end_date,
                draft.resolved_color(),
            ],
        )?;

        let trip = draft.into_trip(self.conn.last_insert_rowid());
        log::debug!(
            "Created trip {} to {} ({}..{})",
            trip.id,
            trip.destination,
            trip.start_date,
            trip.end_date
        );
        Ok(trip)
    }

    /// Retrieve a trip by id.
    pub fn get(&self, id: i64) -> Result<Option<Trip>, PersistenceError> {
        let result = self.conn.query_row(
            "SELECT id, destination, start_date, end_date, color FROM trips WHERE id = ?1",
            [id],
            super::queries::map_trip_row,
        );

        match result {
            Ok(trip) => Ok(Some(trip)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Store `trip` under its id, replacing any existing row.
    pub fn upsert(&self, trip: &Trip) -> Result<Trip, PersistenceError> {
        trip.validate()?;

        self.conn.execute(
            "INSERT INTO trips (id, destination, start_date, end_date, color)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                destination = excluded.destination,
                start_date = excluded.start_date,
                end_date = excluded.end_date,
                color = excluded.color",
            params![
                trip.id,
                trip.destination,
                trip.start_date,
                trip.end_date,
                trip.color,
            ],
        )?;

        self.get(trip.id)?
            .ok_or(PersistenceError::NotFound { id: trip.id })
    }

    /// Delete a trip by id.
    pub fn delete(&self, id: i64) -> Result<(), PersistenceError> {
        let rows_affected = self.conn.execute("DELETE FROM trips WHERE id = ?1", [id])?;

        if rows_affected == 0 {
            return Err(PersistenceError::NotFound { id });
        }

        log::debug!("Deleted trip {}", id);
        Ok(())
    }
}
