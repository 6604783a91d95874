// Database service module
// SQLite connection and schema for the trip and destination stores

mod connection;
mod schema;

pub use connection::Database;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_new_database_in_memory() {
        let result = Database::new(":memory:");
        assert!(result.is_ok(), "Should create in-memory database");
    }

    #[test]
    fn test_new_database_with_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("nested").join("trips.db");

        let result = Database::open(&db_path);
        assert!(result.is_ok(), "Should create file-based database");
        assert!(Path::new(&db_path).exists(), "Database file should exist");
    }

    #[test]
    fn test_initialize_schema_is_idempotent() {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        assert!(db.initialize_schema().is_ok(), "Second run should be a no-op");
    }

    #[test]
    fn test_tables_exist() {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();

        for table in ["trips", "destinations"] {
            let count: i64 = db
                .connection()
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "{} table should exist", table);
        }
    }

    #[test]
    fn test_trips_reject_reversed_range() {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();

        let result = db.connection().execute(
            "INSERT INTO trips (destination, start_date, end_date)
             VALUES ('Bali', '2024-06-07', '2024-06-05')",
            [],
        );
        assert!(result.is_err(), "CHECK constraint should reject end before start");
    }

    #[test]
    fn test_color_column_added_to_legacy_table() {
        let db = Database::new(":memory:").unwrap();
        db.connection()
            .execute(
                "CREATE TABLE trips (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    destination TEXT NOT NULL,
                    start_date TEXT NOT NULL,
                    end_date TEXT NOT NULL
                )",
                [],
            )
            .unwrap();
        db.connection()
            .execute(
                "INSERT INTO trips (destination, start_date, end_date)
                 VALUES ('Hanoi', '2024-06-01', '2024-06-02')",
                [],
            )
            .unwrap();

        db.initialize_schema().unwrap();

        let color: String = db
            .connection()
            .query_row("SELECT color FROM trips", [], |row| row.get(0))
            .unwrap();
        assert_eq!(color, "#94a3b8");
    }
}
