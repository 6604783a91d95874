//! Trip persistence service.
//! SQLite-backed implementation of the [`TripStore`] collaborator, split into
//! write operations (`crud`) and reads (`queries`).

use rusqlite::Connection;

use crate::error::PersistenceError;
use crate::models::trip::Trip;
use crate::services::ports::TripStore;

pub mod crud;
pub mod queries;

/// Service for managing trips stored in SQLite.
pub struct TripService<'a> {
    pub(crate) conn: &'a Connection,
}

impl<'a> TripService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl TripStore for TripService<'_> {
    fn list_trips(&self) -> Result<Vec<Trip>, PersistenceError> {
        self.list_all()
    }

    fn upsert_trip(&self, candidate: &Trip) -> Result<Trip, PersistenceError> {
        self.upsert(candidate)
    }

    fn delete_trip(&self, id: i64) -> Result<(), PersistenceError> {
        self.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScheduleError;
    use crate::models::trip::{NewTrip, DEFAULT_TRIP_COLOR};
    use crate::services::database::Database;
    use crate::services::grid::GridWindow;
    use chrono::NaiveDate;

    fn setup_test_db() -> Database {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        db
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_trip() -> NewTrip {
        NewTrip::new("Kuala Lumpur, Malaysia", ymd(2024, 6, 5), ymd(2024, 6, 7)).unwrap()
    }

    #[test]
    fn test_create_trip() {
        let db = setup_test_db();
        let service = TripService::new(db.connection());

        let created = service.create(sample_trip()).unwrap();
        assert!(created.id > 0);
        assert_eq!(created.destination, "Kuala Lumpur, Malaysia");
        assert_eq!(created.color, DEFAULT_TRIP_COLOR);
    }

    #[test]
    fn test_create_trip_with_color() {
        let db = setup_test_db();
        let service = TripService::new(db.connection());

        let draft = sample_trip().color("#22c55e").unwrap();
        let created = service.create(draft).unwrap();

        let found = service.get(created.id).unwrap().unwrap();
        assert_eq!(found.color, "#22c55e");
        assert_eq!(found.start_date, ymd(2024, 6, 5));
        assert_eq!(found.end_date, ymd(2024, 6, 7));
    }

    #[test]
    fn test_get_nonexistent_trip() {
        let db = setup_test_db();
        let service = TripService::new(db.connection());

        assert!(service.get(999).unwrap().is_none());
    }

    #[test]
    fn test_upsert_updates_existing() {
        let db = setup_test_db();
        let service = TripService::new(db.connection());

        let created = service.create(sample_trip()).unwrap();
        let moved = created.shifted(3).unwrap();
        service.upsert_trip(&moved).unwrap();

        let found = service.get(created.id).unwrap().unwrap();
        assert_eq!(found.start_date, ymd(2024, 6, 8));
        assert_eq!(found.end_date, ymd(2024, 6, 10));
        assert_eq!(service.list_trips().unwrap().len(), 1);
    }

    #[test]
    fn test_upsert_inserts_missing_id() {
        let db = setup_test_db();
        let service = TripService::new(db.connection());

        let trip = Trip::new(42, "Lombok, Indonesia", ymd(2024, 6, 1), ymd(2024, 6, 2)).unwrap();
        let saved = service.upsert_trip(&trip).unwrap();

        assert_eq!(saved, trip);
        assert_eq!(service.get(42).unwrap(), Some(trip));
    }

    #[test]
    fn test_upsert_rejects_invalid_candidate() {
        let db = setup_test_db();
        let service = TripService::new(db.connection());

        let mut trip = Trip::new(1, "Lombok", ymd(2024, 6, 1), ymd(2024, 6, 2)).unwrap();
        trip.end_date = ymd(2024, 5, 30);

        let err = service.upsert_trip(&trip).unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::InvalidTrip(ScheduleError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_delete_trip() {
        let db = setup_test_db();
        let service = TripService::new(db.connection());

        let created = service.create(sample_trip()).unwrap();
        service.delete_trip(created.id).unwrap();

        assert!(service.get(created.id).unwrap().is_none());
    }

    #[test]
    fn test_delete_nonexistent_trip() {
        let db = setup_test_db();
        let service = TripService::new(db.connection());

        let err = service.delete_trip(999).unwrap_err();
        assert!(matches!(err, PersistenceError::NotFound { id: 999 }));
    }

    #[test]
    fn test_list_is_ordered_by_start_then_id() {
        let db = setup_test_db();
        let service = TripService::new(db.connection());

        let later = service
            .create(NewTrip::new("Yangon", ymd(2024, 6, 20), ymd(2024, 6, 21)).unwrap())
            .unwrap();
        let earlier = service
            .create(NewTrip::new("Manila", ymd(2024, 6, 2), ymd(2024, 6, 3)).unwrap())
            .unwrap();

        let ids: Vec<i64> = service.list_trips().unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![earlier.id, later.id]);
    }

    #[test]
    fn test_find_in_window() {
        let db = setup_test_db();
        let service = TripService::new(db.connection());

        service
            .create(NewTrip::new("Before", ymd(2024, 5, 1), ymd(2024, 5, 31)).unwrap())
            .unwrap();
        service
            .create(NewTrip::new("Straddles start", ymd(2024, 5, 30), ymd(2024, 6, 2)).unwrap())
            .unwrap();
        service
            .create(NewTrip::new("Inside", ymd(2024, 6, 10), ymd(2024, 6, 12)).unwrap())
            .unwrap();
        service
            .create(NewTrip::new("After", ymd(2024, 6, 29), ymd(2024, 7, 3)).unwrap())
            .unwrap();

        let window = GridWindow::default_at(ymd(2024, 6, 1)).unwrap();
        let names: Vec<String> = service
            .find_in_window(&window)
            .unwrap()
            .into_iter()
            .map(|t| t.destination)
            .collect();
        assert_eq!(names, vec!["Straddles start", "Inside"]);
    }
}
