use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::models::trip::DEFAULT_TRIP_COLOR;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_trips_table(conn)?;
    run_trip_migrations(conn)?;
    create_destinations_table(conn)?;
    Ok(())
}

fn create_trips_table(conn: &Connection) -> Result<()> {
    conn.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS trips (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                destination TEXT NOT NULL,
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL,
                color TEXT NOT NULL DEFAULT '{}',
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                CHECK (end_date >= start_date)
            )",
            DEFAULT_TRIP_COLOR
        ),
        [],
    )
    .context("Failed to create trips table")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_trips_dates ON trips(start_date, end_date)",
        [],
    )
    .context("Failed to create trips date index")?;

    Ok(())
}

fn run_trip_migrations(conn: &Connection) -> Result<()> {
    // files written before trips carried a display colour
    if !column_exists(conn, "trips", "color")? {
        conn.execute(
            &format!(
                "ALTER TABLE trips ADD COLUMN color TEXT NOT NULL DEFAULT '{}'",
                DEFAULT_TRIP_COLOR
            ),
            [],
        )
        .context("Failed to add trips.color")?;
    }
    Ok(())
}

fn create_destinations_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS destinations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            price_per_night_cents INTEGER NOT NULL CHECK (price_per_night_cents >= 0),
            category TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create destinations table")?;

    Ok(())
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
            [table, column],
            |row| row.get(0),
        )
        .with_context(|| format!("Failed to inspect table info for {}", table))?;

    Ok(count > 0)
}
